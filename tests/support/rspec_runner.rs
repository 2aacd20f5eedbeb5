//! Single-threaded `rspec` execution for suites that share one Bevy `App`.

use rspec::report::Report;
use rspec::{block::Suite, Configuration, ConfigurationBuilder, Logger, Runner};
use std::fmt::Debug;
use std::io;
use std::sync::Arc;

fn serial_configuration() -> Configuration {
    ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(false)
        .build()
        .unwrap_or_else(|e| panic!("serial rspec configuration rejected: {e}"))
}

/// Executes every example of `suite` in declaration order and fails the
/// calling test when any of them failed.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + Debug,
{
    let logger = Arc::new(Logger::new(io::stdout()));
    let report = Runner::new(serial_configuration(), vec![logger]).run(suite);
    assert!(
        report.is_success(),
        "{} of {} rspec examples failed",
        report.get_failed(),
        report.get_passed() + report.get_failed()
    );
}
