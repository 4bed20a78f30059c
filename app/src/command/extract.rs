use chrono::Local;
use runlog_config::Config;
use runlog_extract::Pipeline;
use runlog_providers::TesseractRecognizer;
use std::path::PathBuf;

/// Input for the extract command.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    pub image: PathBuf,
}

/// Strategy for running the extraction pipeline on a local screenshot.
///
/// Prints what would be logged without touching the store.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let pipeline = Pipeline::new(TesseractRecognizer::new(&config.ocr), &config.extraction);

        let details = pipeline
            .process_image(&input.image, Local::now().date_naive())
            .await?;

        println!("Format:   {}", details.variant);
        println!("Date:     {}", runlog_core::format_date(details.date));
        println!("Distance: {}KM", details.distance);
        println!("Pace:     {}", details.pace);
        if let Some(total_time) = &details.total_time {
            println!("Time:     {total_time}");
        }
        if let Some(calories) = &details.calories {
            println!("Calories: {calories}");
        }
        Ok(())
    }
}
