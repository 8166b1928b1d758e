//! Text rendering of the form page

use console::style;
use std::fmt::Write;

use crate::features::{Field, FieldKind, PropertyInputs, Section};
use crate::predict::{FormState, Session};

pub const TITLE: &str = "🏡 House Price Predictor";
pub const PREDICT_ACTION: &str = "🔍 Predict House Price";

/// Domain hint shown next to a control's value
pub fn domain_hint(field: Field) -> String {
    match field.kind() {
        FieldKind::Flag => "0 / 1".to_string(),
        FieldKind::Slider { min, max } => format!("{}-{}", min, max),
        FieldKind::Integer { min, max: Some(max) } => format!("{}-{}", min, max),
        FieldKind::Integer { min, max: None } => format!(">= {}", min),
        FieldKind::Float { min: Some(min) } => format!(">= {}", min),
        FieldKind::Float { min: None } => "any number".to_string(),
        FieldKind::Choice(options) => options.join(" / "),
    }
}

/// One line per control: `Label: value`
pub fn field_line(inputs: &PropertyInputs, field: Field) -> String {
    format!("{}: {}", field.label(), inputs.display_value(field))
}

/// Render the whole page for the current session
pub fn render(session: &Session, currency_symbol: &str) -> String {
    let mut out = String::new();
    let inputs = session.inputs();

    let _ = writeln!(out, "{}", style(TITLE).bold());
    let _ = writeln!(
        out,
        "Enter property details below to estimate the {}.",
        style("sale price").bold()
    );

    for section in Section::ALL {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", style(section.title()).bold().underlined());
        for field in section.fields() {
            let _ = writeln!(
                out,
                "  {}  {}",
                field_line(inputs, field),
                style(format!("({})", domain_hint(field))).dim()
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "─".repeat(49));
    if let Some(message) = session.status_message(currency_symbol) {
        let styled = match session.state() {
            FormState::Failed(_) => style(message).red(),
            _ => style(message).green(),
        };
        let _ = writeln!(out, "{}", styled);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureFrame;
    use crate::model::Inference;
    use crate::predict::Predictor;

    struct Fixed(f64);

    impl Inference for Fixed {
        fn predict(&self, _frame: &FeatureFrame) -> crate::Result<Vec<f64>> {
            Ok(vec![self.0])
        }
    }

    #[test]
    fn test_render_sections_and_fields() {
        let page = render(&Session::default(), "$");

        assert!(page.contains(TITLE));
        for section in Section::ALL {
            assert!(page.contains(section.title()), "missing {}", section);
        }
        for field in Field::ALL {
            assert!(page.contains(field.label()), "missing {}", field);
        }
        assert!(page.contains("Year Built: 1970"));
        assert!(page.contains("Property Type: Crosslease"));
        assert!(!page.contains("Predicted House Price"));
    }

    #[test]
    fn test_render_shows_prediction() {
        let model = Fixed(1_000_000.0);
        let mut session = Session::default();
        session.submit(&Predictor::new(&model));

        let page = render(&session, "$");
        assert!(page.contains("Predicted House Price: $1,000,000"));
    }

    #[test]
    fn test_domain_hints() {
        assert_eq!(domain_hint(Field::YearBuilt), "1800-2025");
        assert_eq!(domain_hint(Field::SoldMonth), "1-12");
        assert_eq!(domain_hint(Field::Bedrooms), ">= 0");
        assert_eq!(domain_hint(Field::Suburb), "Mairangi Bay / Other");
        assert_eq!(domain_hint(Field::DistanceToSchool), "any number");
    }
}
