pub mod builders;
pub mod fakes;

use tracing_subscriber::{fmt, EnvFilter};

/// Route `tracing` output from the crate under test into the test harness.
///
/// Output is captured per test and only shown for failures (or with
/// `--nocapture`). `TASKGUARD_LOG` picks the filter, e.g.
/// `TASKGUARD_LOG=taskguard::resources=trace cargo test`; the default is
/// `warn` so passing runs stay quiet. Safe to call from every test.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKGUARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    // Another test in the same binary may have installed it already.
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .with_line_number(true)
        .try_init();
}
