use runlog_config::Config;
use runlog_core::{DateRange, GroupId, YearMonth, parse_date};
use runlog_store::{DistanceTotals, UserDirectory};

/// Which window to total over.
#[derive(Debug, Clone)]
pub enum ReportPeriod {
    /// `YYYY-MM`
    Month(String),
    /// Inclusive `YYYY-MM-DD` bounds
    Range { from: String, to: String },
}

#[derive(Debug, Clone)]
pub struct ReportInput {
    pub group: GroupId,
    pub period: ReportPeriod,
}

/// Strategy for printing distance totals straight from the store file.
#[derive(Debug, Clone, Copy)]
pub struct ReportStrategy;

fn print_totals(header: &str, totals: &DistanceTotals, users: &UserDirectory) {
    println!("{header}");
    for (user_id, total) in totals {
        let name = users
            .resolve(*user_id)
            .unwrap_or_else(|_| user_id.to_string());
        println!("  {name}: {total}KM");
    }
}

impl super::CommandStrategy for ReportStrategy {
    type Input = ReportInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let store = super::open_workout_store(&config)?;
        let users = UserDirectory::open(config.storage.users_path()?)?;

        match input.period {
            ReportPeriod::Month(month) => {
                let month = YearMonth::parse(&month)?;
                let totals = store.aggregate_by_month(input.group, month)?;
                print_totals(
                    &format!(
                        "Total distance in {} {} for group {}:",
                        month.abbreviation(),
                        month.year(),
                        input.group
                    ),
                    &totals,
                    &users,
                );
            }
            ReportPeriod::Range { from, to } => {
                let range = DateRange::new(parse_date(&from)?, parse_date(&to)?)?;
                let totals = store.aggregate_by_range(input.group, range)?;
                print_totals(
                    &format!("Total distance {from} to {to} for group {}:", input.group),
                    &totals,
                    &users,
                );
            }
        }
        Ok(())
    }
}
