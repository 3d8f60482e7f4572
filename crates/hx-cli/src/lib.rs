//! Library components of the `hxmap` command line tool.

pub mod logging;
pub mod report;
