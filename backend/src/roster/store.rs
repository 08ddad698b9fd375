//! The in-memory roster tables and their persistence.
//!
//! A replace is all-or-nothing: the new table is fully parsed, then written
//! to the data directory, and only then swapped in. A failure at any point
//! leaves the previous table untouched, both in memory and on disk. Startup
//! loading is lenient instead: a missing or malformed persisted file yields
//! an empty table and a warning, never a refusal to boot.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use common::model::crew::CrewMember;
use common::model::equipment::{EquipmentItem, MaintenanceTask};
use log::{info, warn};

use crate::config::AppConfig;
use crate::credentials;
use crate::error::{Error, Result};
use crate::roster::csv::CsvTable;

/// The roster tables. Owned exclusively by the shared application state;
/// nothing else mutates them.
pub struct Roster {
    config: AppConfig,
    /// Crew keyed by derived username.
    crew: BTreeMap<String, CrewMember>,
    /// Equipment rows in upload order.
    equipment: Vec<EquipmentItem>,
    /// Maintenance task rows in upload order.
    maintenance: Vec<MaintenanceTask>,
}

impl Roster {
    /// An empty roster persisting into `config.data_dir`.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            crew: BTreeMap::new(),
            equipment: Vec::new(),
            maintenance: Vec::new(),
        }
    }

    /// Load the tables persisted by earlier replaces.
    pub fn load(config: AppConfig) -> Self {
        let mut roster = Self::new(config);

        if let Some(bytes) = read_optional(&roster.config.crew_csv()) {
            match parse_crew(&bytes) {
                Ok(crew) => roster.crew = crew,
                Err(e) => warn!("ignoring persisted crew list: {}", e),
            }
        }
        if let Some(bytes) = read_optional(&roster.config.equipment_csv()) {
            match parse_equipment(&bytes) {
                Ok(equipment) => roster.equipment = equipment,
                Err(e) => warn!("ignoring persisted equipment list: {}", e),
            }
        }
        if let Some(bytes) = read_optional(&roster.config.maintenance_csv()) {
            match parse_maintenance(&bytes) {
                Ok(maintenance) => roster.maintenance = maintenance,
                Err(e) => warn!("ignoring persisted maintenance tasks: {}", e),
            }
        }

        roster
    }

    /// Replace the whole crew table from an uploaded CSV.
    ///
    /// Requires a `name` column. Rows with a blank name are skipped. Two
    /// names deriving the same username are a data-quality problem in the
    /// upload and reject it outright.
    pub fn replace_crew(&mut self, bytes: &[u8]) -> Result<usize> {
        let crew = parse_crew(bytes)?;
        self.persist_crew(&crew)?;
        self.crew = crew;
        info!("crew list replaced: {} members", self.crew.len());
        Ok(self.crew.len())
    }

    /// Replace the whole equipment table from an uploaded CSV.
    /// Requires `appliance` and `equipment_name` columns.
    pub fn replace_equipment(&mut self, bytes: &[u8]) -> Result<usize> {
        let equipment = parse_equipment(bytes)?;
        write_csv(
            &self.config.equipment_csv(),
            &["appliance", "equipment_name"],
            equipment
                .iter()
                .map(|item| vec![item.appliance.clone(), item.equipment_name.clone()]),
        )?;
        self.equipment = equipment;
        info!("equipment list replaced: {} items", self.equipment.len());
        Ok(self.equipment.len())
    }

    /// Replace the whole maintenance task table from an uploaded CSV.
    /// Requires `appliance` and `task` columns; `area` and `training` are
    /// optional.
    pub fn replace_maintenance_tasks(&mut self, bytes: &[u8]) -> Result<usize> {
        let maintenance = parse_maintenance(bytes)?;
        write_csv(
            &self.config.maintenance_csv(),
            &["appliance", "task", "area", "training"],
            maintenance.iter().map(|task| {
                vec![
                    task.appliance.clone(),
                    task.task.clone(),
                    task.area.clone(),
                    task.training.clone(),
                ]
            }),
        )?;
        self.maintenance = maintenance;
        info!("maintenance tasks replaced: {} rows", self.maintenance.len());
        Ok(self.maintenance.len())
    }

    pub fn lookup_crew_by_username(&self, username: &str) -> Option<&CrewMember> {
        self.crew.get(username)
    }

    /// Equipment carried by `appliance`, in upload order. Empty when the
    /// appliance is unknown; the caller decides whether that is an error.
    pub fn equipment_for_appliance(&self, appliance: &str) -> Vec<&EquipmentItem> {
        self.equipment
            .iter()
            .filter(|item| item.appliance == appliance)
            .collect()
    }

    /// Maintenance tasks for `appliance`, in upload order.
    pub fn tasks_for_appliance(&self, appliance: &str) -> Vec<&MaintenanceTask> {
        self.maintenance
            .iter()
            .filter(|task| task.appliance == appliance)
            .collect()
    }

    /// Appliances named by the current equipment list.
    pub fn known_appliances(&self) -> BTreeSet<&str> {
        self.equipment
            .iter()
            .map(|item| item.appliance.as_str())
            .collect()
    }

    /// Appliances named by the current maintenance task list.
    pub fn known_maintenance_appliances(&self) -> BTreeSet<&str> {
        self.maintenance
            .iter()
            .map(|task| task.appliance.as_str())
            .collect()
    }

    /// The full appliance -> equipment names map, for form rendering.
    pub fn equipment_by_appliance(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut map: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for item in &self.equipment {
            map.entry(item.appliance.as_str())
                .or_default()
                .push(item.equipment_name.as_str());
        }
        map
    }

    /// The full appliance -> maintenance tasks map, for form rendering.
    pub fn tasks_by_appliance(&self) -> BTreeMap<&str, Vec<&MaintenanceTask>> {
        let mut map: BTreeMap<&str, Vec<&MaintenanceTask>> = BTreeMap::new();
        for task in &self.maintenance {
            map.entry(task.appliance.as_str()).or_default().push(task);
        }
        map
    }

    /// Write the crew table and the derived credentials table.
    fn persist_crew(&self, crew: &BTreeMap<String, CrewMember>) -> Result<()> {
        write_csv(
            &self.config.crew_csv(),
            &["name"],
            crew.values().map(|member| vec![member.name.clone()]),
        )?;
        write_csv(
            &self.config.users_csv(),
            &["name", "username", "password"],
            crew.values().map(|member| {
                vec![
                    member.name.clone(),
                    member.username.clone(),
                    member.password.clone(),
                ]
            }),
        )
    }
}

fn read_optional(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).ok()
}

/// Overwrite `path` with a header row plus `rows`. Replaced tables are the
/// one place where rewriting a CSV is allowed; submission logs never go
/// through here.
fn write_csv(
    path: &Path,
    header: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_crew(bytes: &[u8]) -> Result<BTreeMap<String, CrewMember>> {
    let table = CsvTable::parse(bytes)?;
    let name_col = table
        .column("name", "name")
        .ok_or_else(|| Error::schema("missing 'name' column"))?;

    let mut crew = BTreeMap::new();
    for row in table.rows() {
        let name = table.value(row, name_col);
        if name.is_empty() {
            continue;
        }
        let username = credentials::derive_username(name);
        let member = CrewMember {
            name: name.to_string(),
            username: username.clone(),
            password: credentials::derive_password(name),
        };
        if crew.insert(username.clone(), member).is_some() {
            return Err(Error::schema(format!(
                "two crew members derive the same username '{}'",
                username
            )));
        }
    }
    Ok(crew)
}

fn parse_equipment(bytes: &[u8]) -> Result<Vec<EquipmentItem>> {
    let table = CsvTable::parse(bytes)?;
    let appliance_col = table
        .column("appliance", "appliance")
        .ok_or_else(|| Error::schema("missing 'appliance' column"))?;
    let equipment_col = table
        .column("equipmentname", "equip")
        .ok_or_else(|| Error::schema("missing 'equipment_name' column"))?;

    let mut equipment = Vec::new();
    for row in table.rows() {
        let appliance = table.value(row, appliance_col);
        let equipment_name = table.value(row, equipment_col);
        if appliance.is_empty() || equipment_name.is_empty() {
            continue;
        }
        equipment.push(EquipmentItem {
            appliance: appliance.to_string(),
            equipment_name: equipment_name.to_string(),
        });
    }
    Ok(equipment)
}

fn parse_maintenance(bytes: &[u8]) -> Result<Vec<MaintenanceTask>> {
    let table = CsvTable::parse(bytes)?;
    let appliance_col = table
        .column("appliance", "appliance")
        .ok_or_else(|| Error::schema("missing 'appliance' column"))?;
    let task_col = table
        .column("task", "task")
        .ok_or_else(|| Error::schema("missing 'task' column"))?;
    let area_col = table.column("area", "area");
    let training_col = table.column("training", "train");

    let mut maintenance = Vec::new();
    for row in table.rows() {
        let appliance = table.value(row, appliance_col);
        let task = table.value(row, task_col);
        if appliance.is_empty() || task.is_empty() {
            continue;
        }
        maintenance.push(MaintenanceTask {
            appliance: appliance.to_string(),
            task: task.to_string(),
            area: area_col.map(|c| table.value(row, c).to_string()).unwrap_or_default(),
            training: training_col
                .map(|c| table.value(row, c).to_string())
                .unwrap_or_default(),
        });
    }
    Ok(maintenance)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn test_config(dir: &TempDir) -> AppConfig {
        AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        }
    }

    /// Roster with only a crew table, for credential tests.
    pub(crate) fn roster_with_crew(names: &[&str]) -> Roster {
        let dir = TempDir::new().unwrap();
        let mut roster = Roster::new(test_config(&dir));
        let mut upload = String::from("name\n");
        for name in names {
            upload.push_str(name);
            upload.push('\n');
        }
        roster.replace_crew(upload.as_bytes()).unwrap();
        roster
    }

    /// Roster with only an equipment table, for validator tests.
    pub(crate) fn roster_with_equipment(rows: &[(&str, &str)]) -> Roster {
        let dir = TempDir::new().unwrap();
        let mut roster = Roster::new(test_config(&dir));
        let mut upload = String::from("appliance,equipment_name\n");
        for (appliance, equipment_name) in rows {
            upload.push_str(&format!("{},{}\n", appliance, equipment_name));
        }
        roster.replace_equipment(upload.as_bytes()).unwrap();
        roster
    }

    /// Roster with only a maintenance task table.
    pub(crate) fn roster_with_tasks(rows: &[(&str, &str)]) -> Roster {
        let dir = TempDir::new().unwrap();
        let mut roster = Roster::new(test_config(&dir));
        let mut upload = String::from("appliance,task\n");
        for (appliance, task) in rows {
            upload.push_str(&format!("{},{}\n", appliance, task));
        }
        roster.replace_maintenance_tasks(upload.as_bytes()).unwrap();
        roster
    }

    #[test]
    fn replace_crew_derives_credentials() {
        let roster = roster_with_crew(&["Jane Doe", "Alex Scott"]);
        let jane = roster.lookup_crew_by_username("janedoe").unwrap();
        assert_eq!(jane.name, "Jane Doe");
        assert_eq!(jane.password, "janedoe3865");
        assert!(roster.lookup_crew_by_username("alexscott").is_some());
        assert!(roster.lookup_crew_by_username("nobody").is_none());
    }

    #[test]
    fn replace_crew_without_name_column_keeps_previous_table() {
        let dir = TempDir::new().unwrap();
        let mut roster = Roster::new(test_config(&dir));
        roster.replace_crew(b"name\nJane Doe\n").unwrap();

        let err = roster.replace_crew(b"rank,station\nCaptain,Rutherglen\n");
        assert!(matches!(err, Err(Error::Schema { .. })));
        assert!(roster.lookup_crew_by_username("janedoe").is_some());
    }

    #[test]
    fn replace_crew_rejects_duplicate_derived_usernames() {
        let dir = TempDir::new().unwrap();
        let mut roster = Roster::new(test_config(&dir));
        let err = roster.replace_crew(b"name\nJane Doe\nJANE   DOE\n").unwrap_err();
        assert!(err.to_string().contains("janedoe"));
        assert!(roster.lookup_crew_by_username("janedoe").is_none());
    }

    #[test]
    fn replace_crew_skips_blank_names_and_matches_loose_headers() {
        let dir = TempDir::new().unwrap();
        let mut roster = Roster::new(test_config(&dir));
        let count = roster
            .replace_crew(b"Crew Member Name\nJane Doe\n\nAlex Scott\n")
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn equipment_is_scoped_to_its_appliance_in_upload_order() {
        let roster = roster_with_equipment(&[
            ("Pumper", "Hose A"),
            ("Tanker 1", "Chainsaw"),
            ("Pumper", "Hose B"),
        ]);

        let pumper: Vec<&str> = roster
            .equipment_for_appliance("Pumper")
            .iter()
            .map(|item| item.equipment_name.as_str())
            .collect();
        assert_eq!(pumper, vec!["Hose A", "Hose B"]);

        assert!(roster.equipment_for_appliance("FCV").is_empty());
        let appliances: Vec<&str> = roster.known_appliances().into_iter().collect();
        assert_eq!(appliances, vec!["Pumper", "Tanker 1"]);
    }

    #[test]
    fn replace_equipment_requires_both_columns() {
        let dir = TempDir::new().unwrap();
        let mut roster = Roster::new(test_config(&dir));
        let err = roster.replace_equipment(b"appliance\nPumper\n").unwrap_err();
        assert!(err.to_string().contains("equipment_name"));
    }

    #[test]
    fn maintenance_tasks_keep_optional_columns() {
        let dir = TempDir::new().unwrap();
        let mut roster = Roster::new(test_config(&dir));
        roster
            .replace_maintenance_tasks(
                b"appliance,task,area,training\nPumper,Check oil,Engine bay,Basic\n",
            )
            .unwrap();
        let tasks = roster.tasks_for_appliance("Pumper");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].area, "Engine bay");
        assert_eq!(tasks[0].training, "Basic");

        // Optional columns may be absent entirely.
        roster
            .replace_maintenance_tasks(b"appliance,task\nPumper,Check oil\n")
            .unwrap();
        assert_eq!(roster.tasks_for_appliance("Pumper")[0].area, "");
    }

    #[test]
    fn replace_persists_and_load_restores() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);

        let mut roster = Roster::new(config.clone());
        roster.replace_crew(b"name\nJane Doe\n").unwrap();
        roster
            .replace_equipment(b"appliance,equipment_name\nPumper,Hose A\n")
            .unwrap();
        assert!(config.crew_csv().exists());
        assert!(config.users_csv().exists());
        assert!(config.equipment_csv().exists());

        let reloaded = Roster::load(config);
        assert!(reloaded.lookup_crew_by_username("janedoe").is_some());
        assert_eq!(reloaded.equipment_for_appliance("Pumper").len(), 1);
    }

    #[test]
    fn users_csv_carries_derived_credentials() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let mut roster = Roster::new(config.clone());
        roster.replace_crew(b"name\nJane Doe\n").unwrap();

        let users = fs::read_to_string(config.users_csv()).unwrap();
        assert!(users.starts_with("name,username,password\n"));
        assert!(users.contains("Jane Doe,janedoe,janedoe3865"));
    }

    #[test]
    fn load_tolerates_missing_and_malformed_files() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(config.crew_csv(), b"rank\nCaptain\n").unwrap();

        let roster = Roster::load(config);
        assert!(roster.lookup_crew_by_username("captain").is_none());
        assert!(roster.known_appliances().is_empty());
    }
}
