use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("source index {index} is out of bounds for a list of {len} items")]
    SourceOutOfBounds { index: usize, len: usize },
    #[error("target index {index} is out of bounds for a list of {len} items")]
    TargetOutOfBounds { index: usize, len: usize },
}

/// Removes the value at `source_idx` and reinserts it so that it ends up at `target_idx`.
///
/// Does nothing if both indices are equal. Both indices must point into `vec`.
pub fn move_item<T>(
    vec: &mut Vec<T>,
    source_idx: usize,
    target_idx: usize,
) -> Result<(), MoveError> {
    let len = vec.len();
    if source_idx >= len {
        return Err(MoveError::SourceOutOfBounds {
            index: source_idx,
            len,
        });
    }
    if target_idx >= len {
        return Err(MoveError::TargetOutOfBounds {
            index: target_idx,
            len,
        });
    }
    if source_idx == target_idx {
        return Ok(());
    }

    let item = vec.remove(source_idx);
    vec.insert(target_idx, item);
    Ok(())
}
