use crate::args::Cli;
use crate::{logging, output};
use anyhow::Result;
use jobinfo_engine::Presenter;
use jobinfo_runtime::{Config, ReportService};

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config = Config::load(cli.config.as_deref())?;
    let service = ReportService::from_config(&config);

    let record = service.fetch(&cli.job_id)?;
    let report = Presenter::new(cli.verbose).present(&record);
    tracing::debug!(
        job = %cli.job_id,
        format = %cli.format,
        fields = report.fields.len(),
        "rendering report"
    );

    let text = output::render(
        cli.format,
        &cli.job_id,
        &record,
        &report,
        config.label_width,
    )?;
    print!("{}", text);
    Ok(())
}
