use std::convert::Infallible;

use clap::Subcommand;
use serde_json::Value;

use crate::app::AdvisorController;
use crate::domain::{Budget, DomainError, Profile};

/// Advisor operations exposed on the command line.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show how a budget is split across component categories.
    Budget {
        /// gaming, graphics, office, server, home or development; anything
        /// else uses the general share table
        #[arg(short, long, default_value = "general", value_parser = lenient_profile)]
        profile: Profile,
        /// Total budget in whole currency units.
        budget: Budget,
    },

    /// Recommend a compatible build.
    Build {
        #[arg(short, long, default_value = "general", value_parser = lenient_profile)]
        profile: Profile,
        budget: Budget,
        /// Only consider CPUs from this manufacturer.
        #[arg(long)]
        brand: Option<String>,
    },

    /// Find a pre-assembled system.
    Prebuilt {
        #[arg(short, long, default_value = "general", value_parser = lenient_profile)]
        profile: Profile,
        budget: Budget,
        /// Skip a system already shown; repeatable.
        #[arg(long = "exclude", value_name = "NAME")]
        excluded: Vec<String>,
    },

    /// List CPU manufacturers available as brand filters.
    Brands,
}

fn lenient_profile(label: &str) -> Result<Profile, Infallible> {
    Ok(Profile::from_label(label))
}

/// Run a command and return its result as JSON.
pub fn execute(controller: &AdvisorController, command: Command) -> Result<Value, DomainError> {
    let value = match command {
        Command::Budget { profile, budget } => {
            serde_json::to_value(controller.allocate_budget(profile, budget))?
        }
        Command::Build {
            profile,
            budget,
            brand,
        } => serde_json::to_value(controller.resolve(profile, budget, brand.as_deref())?)?,
        Command::Prebuilt {
            profile,
            budget,
            excluded,
        } => {
            let found = if excluded.is_empty() {
                controller.find_best_prebuilt(profile, budget)?
            } else {
                controller.find_next_prebuilt(profile, budget, &excluded)?
            };
            serde_json::to_value(found)?
        }
        Command::Brands => serde_json::to_value(controller.cpu_brands()?)?,
    };
    Ok(value)
}
