use crate::catalog::{Catalog, PlantRecord};
use crate::interval::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Water,
    Mist,
    Repot,
    Temperature,
    Soil,
    Toxicity,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Water,
        Field::Mist,
        Field::Repot,
        Field::Temperature,
        Field::Soil,
        Field::Toxicity,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleLine {
    pub field: Field,
    pub text: String,
}

/// Display lines for one plant, in Water, Mist, Repot, Temperature, Soil, Toxicity order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub plant: String,
    pub lines: Vec<ScheduleLine>,
}

impl Schedule {
    pub fn line(&self, field: Field) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.field == field)
            .map(|line| line.text.as_str())
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// Title followed by every non-empty line, newline separated.
    pub fn clipboard_text(&self) -> String {
        std::iter::once(self.plant.as_str())
            .chain(self.lines.iter().map(|line| line.text.as_str()))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Looks the plant up by exact name. `None` means the caller should hide any shown schedule.
pub fn lookup_schedule(catalog: &Catalog, name: &str) -> Option<Schedule> {
    let Some(record) = catalog.get(name) else {
        tracing::warn!(plant = name, "plant not found in catalog");
        return None;
    };
    Some(Schedule {
        plant: name.to_string(),
        lines: format_schedule(record),
    })
}

pub fn format_schedule(record: &PlantRecord) -> Vec<ScheduleLine> {
    let mut lines = vec![line(Field::Water, water_text(record))];

    match record.misting {
        Interval::Unspecified => {}
        Interval::NotApplicable => lines.push(line(Field::Mist, "No misting needed.".to_string())),
        Interval::Every(days) => lines.push(line(Field::Mist, format!("Mist every {days} days."))),
    }

    let repot = match record.repotting {
        Interval::NotApplicable => "No repotting needed.".to_string(),
        Interval::Every(months) => format!("Repot every {months} months."),
        Interval::Unspecified => "Repot every 0 months.".to_string(),
    };
    lines.push(line(Field::Repot, repot));

    lines.extend(common_tail(record, "Ideal temperature", "Soil type"));
    lines
}

/// Bulleted lines for the exported document. Mist and repot are left out unless they carry a number.
pub fn format_pdf_lines(record: &PlantRecord) -> Vec<ScheduleLine> {
    let mut lines = vec![line(Field::Water, water_text(record))];
    if let Some(days) = record.misting.every() {
        lines.push(line(Field::Mist, format!("Mist every {days} days.")));
    }
    if let Some(months) = record.repotting.every() {
        lines.push(line(Field::Repot, format!("Repot every {months} months.")));
    }
    lines.extend(common_tail(record, "Temperature", "Soil Type"));

    for entry in &mut lines {
        entry.text = format!("• {}", entry.text);
    }
    lines
}

fn water_text(record: &PlantRecord) -> String {
    format!("Water every {} days.", record.watering_days)
}

fn common_tail(record: &PlantRecord, temperature_label: &str, soil_label: &str) -> [ScheduleLine; 3] {
    [
        line(
            Field::Temperature,
            format!("{temperature_label}: {}", record.temperature),
        ),
        line(Field::Soil, format!("{soil_label}: {}", record.soil_type)),
        line(Field::Toxicity, format!("Toxicity: {}", record.toxicity)),
    ]
}

fn line(field: Field, text: String) -> ScheduleLine {
    ScheduleLine { field, text }
}
