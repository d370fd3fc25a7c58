use thiserror::Error;

/// Size of a single socket read while collecting the response head.
pub const READ_CHUNK_BYTES: usize = 4096;

pub const MAX_HEAD_BYTES: usize = 8 * 1024; // 8KB cap for a handshake reply

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimitError {
    #[error("response head too large: {actual} bytes (max {max})")]
    TooLarge { max: usize, actual: usize },
}

pub type LimitResult<T> = Result<T, LimitError>;

pub fn enforce_max_head_size(len: usize, max: usize) -> LimitResult<()> {
    if len > max {
        return Err(LimitError::TooLarge { max, actual: len });
    }
    Ok(())
}
