pub trait ResultOkLogExt<T, E> {
    fn ok_log(self) -> Option<T>;
    fn ok_log_with(self, what: &str) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn ok_log(self) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::error!("{err}");
                None
            }
        }
    }

    // For per-process failures during a scan: routine churn, logged at
    // debug with a short context prefix.
    fn ok_log_with(self, what: &str) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::debug!("{what}: {err}");
                None
            }
        }
    }
}
