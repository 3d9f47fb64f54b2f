mod cli;
mod logging;

use anyhow::{Context, Result};
use std::process::ExitCode;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options();
    vhitems::run(&options).with_context(|| {
        format!("extraction from {} failed", options.asset_root.display())
    })?;
    Ok(())
}

/// Map a failure to the exit code of its class
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<vhitems::Error>()
        .map(vhitems::Error::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_through_context() {
        let err = anyhow::Error::new(vhitems::Error::MissingFile(PathBuf::from("x")))
            .context("extraction failed");
        assert_eq!(exit_code(&err), 4);
    }

    #[test]
    fn test_exit_code_other_error() {
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }
}
