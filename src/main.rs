//! Records daily repository statistics and commits them back to a branch.

use repo_stats::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Host that writes to the process's standard streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
