use clap::Parser;
use plate_locator::{annotate, engines, Args, Config, PlateError, PlateProcessor, PlateReading};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status when the run completed but no plate was found
const EXIT_NOT_FOUND: u8 = 2;

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from(args);

    tracing::info!("Starting plate-locator v{}", env!("CARGO_PKG_VERSION"));

    match run(&config) {
        Ok(reading) => {
            print_reading(&reading, config.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if config.json => {
            println!("{}", serde_json::to_string_pretty(&e.report())?);
            Ok(exit_code_for(&e))
        }
        Err(e) if e.is_not_found() => {
            eprintln!("plate not found: {}", e);
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
        Err(e) => Err(e.into()),
    }
}

fn run(config: &Config) -> Result<PlateReading, PlateError> {
    let recognizer = config
        .recognizer
        .as_ref()
        .map(engines::build_recognizer)
        .transpose()?;
    let processor = PlateProcessor::new(config.params.clone(), recognizer)?;

    let image = PlateProcessor::load(&config.image)?;
    tracing::info!(
        "Loaded {:?} ({}x{})",
        config.image,
        image.width(),
        image.height()
    );

    let (reading, localization) = processor.process(image)?;

    if let Some(output) = &config.output {
        let font = config.font.as_deref().map(annotate::load_font).transpose()?;
        let text = reading
            .recognition
            .as_ref()
            .map(|r| r.text.as_str())
            .unwrap_or_default();
        let annotated = annotate::annotate(&localization.color, reading.bbox, text, font.as_ref());
        annotate::save(&annotated, output)?;
        tracing::info!("Annotated image written to {:?}", output);
    }

    Ok(reading)
}

fn print_reading(reading: &PlateReading, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reading)?);
        return Ok(());
    }

    let bbox = reading.bbox;
    println!(
        "plate: x={} y={} width={} height={}",
        bbox.x, bbox.y, bbox.width, bbox.height
    );
    if let Some(recognition) = &reading.recognition {
        println!("text: {}", recognition.text);
    }
    Ok(())
}

fn exit_code_for(error: &PlateError) -> ExitCode {
    if error.is_not_found() {
        ExitCode::from(EXIT_NOT_FOUND)
    } else {
        ExitCode::FAILURE
    }
}
