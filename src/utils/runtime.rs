use anyhow::Result;

/// Everything runs on one thread: the aggregation task is the only writer of the log and the
/// delivery task only forwards into it.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
