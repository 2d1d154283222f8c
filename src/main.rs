use dev_icon::{cli::Args, generate};

fn setup_logger(verbose: bool) -> eyre::Result<()> {
    use tracing::Level;
    use tracing_subscriber::{
        filter::LevelFilter, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry,
    };

    let level = if verbose { Level::DEBUG } else { Level::WARN };
    Registry::default()
        .with(LevelFilter::from(level))
        .with(
            layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args: Args = argh::from_env();
    setup_logger(args.verbose)?;

    let config = args.into_config();
    generate::run(&config, &mut std::io::stdout().lock())?;
    Ok(())
}
