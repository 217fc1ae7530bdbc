/// ProgressReporter port for user feedback during long-running analyses
///
/// Messages go to a side channel (stderr) so they never mix with the
/// exported graph on stdout.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, message: &str);

    /// Reports resolution progress: packages resolved so far and the
    /// current package name
    fn report_progress(&self, resolved: usize, message: Option<&str>);

    fn report_error(&self, message: &str);

    fn report_completion(&self, message: &str);
}
