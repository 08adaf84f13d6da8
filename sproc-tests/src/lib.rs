mod blobs;
mod cursors;
mod fake;
mod functions;
mod in_out;
mod math;
mod nullability;
mod ordering;
mod recovery;
mod reuse;
mod roundtrip;

pub use blobs::*;
pub use cursors::*;
pub use fake::*;
pub use functions::*;
pub use in_out::*;
pub use math::*;
pub use nullability::*;
pub use ordering::*;
pub use recovery::*;
pub use reuse::*;
pub use roundtrip::*;

use log::LevelFilter;
use sproc::Connection;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run every portable suite against a connection whose backend carries the
/// [`standard_db`] routines. The cursor suite is separate, it needs a vendor
/// cursor type.
pub fn execute_tests<E: Connection>(connection: &mut E) {
    math(connection);
    functions(connection);
    in_out(connection);
    ordering(connection);
    nullability(connection);
    blobs(connection);
    roundtrip(connection);
    reuse(connection);
    recovery(connection);
}
