//! Format command: re-emit a control file through the writer.

use anyhow::{Context, Result};
use tracing::info;

use remora_params::{Schema, WriterConfig, clean_params, parse_file, write_file, write_str};

use crate::cli::FormatArgs;

pub fn run(args: FormatArgs) -> Result<()> {
    let mut params = parse_file(&args.file)
        .with_context(|| format!("failed to read control file: {}", args.file.display()))?;
    if args.clean {
        params = clean_params(&params);
    }

    let schema = Schema::remora();
    let mut writer = WriterConfig::default().with_include_defaults(!args.skip_defaults);
    if args.skip_defaults {
        writer = writer.with_schema(&schema);
    }
    if let Some(header) = args.header {
        writer = writer.with_header_comment(header);
    }

    match &args.output {
        Some(path) => {
            write_file(&params, path, &writer)
                .with_context(|| format!("failed to write control file: {}", path.display()))?;
            info!(path = %path.display(), n_params = params.len(), "formatted control file");
        }
        None => print!("{}", write_str(&params, &writer)),
    }
    Ok(())
}
