use std::collections::BTreeMap;

use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::brewery::KettleState;
use crate::dialogs;

/// Generic failure reply for a brewery call that went wrong.
pub const REMOTE_FAILURE: &str = "🚫 The brewery controller did not respond, try again later.";

/// One-time reply keyboard of dialog choices, one per row, with a closing row.
pub fn choice_keyboard(options: &[&str]) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = options
        .iter()
        .map(|option| vec![KeyboardButton::new(*option)])
        .collect();
    rows.push(vec![KeyboardButton::new(dialogs::CLOSE_LABEL)]);

    KeyboardMarkup::new(rows).resize_keyboard().one_time_keyboard()
}

/// One `{id} {on|off}, ⌖: {target}C` line per kettle.
pub fn kettle_lines(states: &BTreeMap<String, KettleState>) -> String {
    states
        .iter()
        .map(|(id, kettle)| {
            let mode = if kettle.automatic { "on" } else { "off" };
            format!("{} {}, ⌖: {}C", id, mode, format_reading(kettle.target_temp))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `🌡 {sensor}: {reading}C` line per thermometer.
pub fn thermometer_lines(readings: &BTreeMap<String, f64>) -> String {
    readings
        .iter()
        .map(|(sensor, reading)| format!("🌡 {}: {}C", sensor, format_reading(*reading)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The /status reply layout.
pub fn status_text(
    kettles: &BTreeMap<String, KettleState>,
    readings: &BTreeMap<String, f64>,
) -> String {
    format!(
        "\nPID status :\n{}\n\nTemps status :\n{}",
        kettle_lines(kettles),
        thermometer_lines(readings),
    )
}

/// Whole temperatures render without a decimal point.
fn format_reading(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kettles() -> BTreeMap<String, KettleState> {
        BTreeMap::from([
            (
                "1".to_string(),
                KettleState {
                    automatic: true,
                    target_temp: 70.0,
                },
            ),
            (
                "2".to_string(),
                KettleState {
                    automatic: false,
                    target_temp: 65.5,
                },
            ),
        ])
    }

    #[test]
    fn kettle_lines_render_one_line_per_kettle() {
        assert_eq!(kettle_lines(&kettles()), "1 on, ⌖: 70C\n2 off, ⌖: 65.5C");
    }

    #[test]
    fn thermometer_lines_render_one_line_per_sensor() {
        let readings = BTreeMap::from([("boil".to_string(), 99.2), ("mash".to_string(), 66.0)]);
        assert_eq!(
            thermometer_lines(&readings),
            "🌡 boil: 99.2C\n🌡 mash: 66C"
        );
    }

    #[test]
    fn whole_readings_drop_the_decimal_point() {
        assert_eq!(format_reading(70.0), "70");
        assert_eq!(format_reading(65.5), "65.5");
        assert_eq!(format_reading(0.0), "0");
    }

    #[test]
    fn status_reply_contains_every_kettle_and_sensor() {
        let readings = BTreeMap::from([("mash".to_string(), 66.0)]);

        assert_eq!(
            status_text(&kettles(), &readings),
            "\nPID status :\n1 on, ⌖: 70C\n2 off, ⌖: 65.5C\n\nTemps status :\n🌡 mash: 66C"
        );
    }

    #[test]
    fn choice_keyboard_offers_every_option_plus_close() {
        let keyboard = choice_keyboard(&["Europe", "Asia"]);

        let labels: Vec<String> = keyboard
            .keyboard
            .iter()
            .flat_map(|row| row.iter().map(|button| button.text.clone()))
            .collect();
        assert_eq!(labels, ["Europe", "Asia", dialogs::CLOSE_LABEL]);
    }
}
