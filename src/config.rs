use crate::calendar::HolidayCalendar;
use crate::month::TargetMonth;
use crate::scheduler::{AssignOptions, Scheduler};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Configuration persistée d'un service : roster, règles individuelles,
/// fériés supplémentaires et options d'assignation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    pub staff: Vec<String>,
    #[serde(default)]
    pub individual_rules: Vec<String>,
    /// Fériés hors table de référence (autres années, fermetures locales).
    #[serde(default)]
    pub extra_holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub options: AssignOptions,
}

impl RosterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.staff.is_empty() {
            bail!("staff list cannot be empty");
        }
        let mut seen = HashSet::new();
        for name in &self.staff {
            if name.trim().is_empty() {
                bail!("staff name cannot be blank");
            }
            if !seen.insert(name.trim()) {
                bail!("duplicate staff name: {name}");
            }
        }
        if self.options.max_consecutive_days == 0 {
            bail!("options.max_consecutive_days must be > 0");
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_slice(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        crate::io::write_atomic(path, json.as_bytes())
    }

    pub fn calendar(&self) -> HolidayCalendar {
        HolidayCalendar::reference().with_extra(self.extra_holidays.iter().copied())
    }

    /// Scheduler prêt à recevoir les souhaits du mois.
    pub fn scheduler(&self, month: TargetMonth) -> Scheduler {
        Scheduler::new(month, self.staff.as_slice())
            .with_rule_lines(self.individual_rules.as_slice())
            .with_calendar(self.calendar())
            .with_options(self.options)
    }
}
