//! Interactive terminal form
//!
//! Every action (editing a control or pressing predict) re-renders the whole
//! page from the session state.

use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use super::page::{self, PREDICT_ACTION};
use crate::features::{inputs, Field, FieldKind};
use crate::model::Inference;
use crate::predict::{Predictor, Session};
use crate::Result;

/// Item picked from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit(Field),
    Predict,
    Quit,
}

/// Main menu entries: every control in render order, then the actions
pub fn menu(session: &Session) -> Vec<(Action, String)> {
    let mut items: Vec<(Action, String)> = Field::ALL
        .into_iter()
        .map(|f| (Action::Edit(f), page::field_line(session.inputs(), f)))
        .collect();
    items.push((Action::Predict, PREDICT_ACTION.to_string()));
    items.push((Action::Quit, "Quit".to_string()));
    items
}

/// Interactive form bound to one predictor
pub struct InteractiveForm<'p, 'm, M: Inference + ?Sized> {
    predictor: &'p Predictor<'m, M>,
    session: Session,
    currency_symbol: String,
    theme: ColorfulTheme,
    term: Term,
}

impl<'p, 'm, M: Inference + ?Sized> InteractiveForm<'p, 'm, M> {
    pub fn new(predictor: &'p Predictor<'m, M>, currency_symbol: impl Into<String>) -> Self {
        InteractiveForm {
            predictor,
            session: Session::default(),
            currency_symbol: currency_symbol.into(),
            theme: ColorfulTheme::default(),
            term: Term::stdout(),
        }
    }

    /// Run until the user quits
    pub fn run(&mut self) -> Result<()> {
        let mut cursor = 0;
        loop {
            self.term.clear_screen()?;
            self.term
                .write_line(&page::render(&self.session, &self.currency_symbol))?;

            let items = menu(&self.session);
            let labels: Vec<&str> = items.iter().map(|(_, label)| label.as_str()).collect();
            let selection = Select::with_theme(&self.theme)
                .with_prompt("Choose a field to edit, or predict")
                .items(&labels)
                .default(cursor.min(labels.len() - 1))
                .interact_on_opt(&self.term)?;

            let Some(index) = selection else {
                return Ok(());
            };
            cursor = index;

            match items[index].0 {
                Action::Edit(field) => self.edit_field(field)?,
                Action::Predict => {
                    self.session.submit(self.predictor);
                }
                Action::Quit => return Ok(()),
            }
        }
    }

    /// Prompt for a new value using the control that fits the field
    fn edit_field(&mut self, field: Field) -> Result<()> {
        let values = self.session.inputs();
        let raw = match field.kind() {
            FieldKind::Flag => {
                let current = values.selected_index(field).unwrap_or(0);
                let index = Select::with_theme(&self.theme)
                    .with_prompt(field.label())
                    .items(&["0", "1"])
                    .default(current)
                    .interact_on(&self.term)?;
                index.to_string()
            }
            FieldKind::Choice(options) => {
                let current = values.selected_index(field).unwrap_or(0);
                let index = Select::with_theme(&self.theme)
                    .with_prompt(field.label())
                    .items(options)
                    .default(current)
                    .interact_on(&self.term)?;
                options[index].to_string()
            }
            FieldKind::Slider { .. } | FieldKind::Integer { .. } | FieldKind::Float { .. } => {
                let current = values.edit_value(field);
                let prompt = format!("{} ({})", field.label(), page::domain_hint(field));
                Input::<String>::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .with_initial_text(current)
                    .validate_with(move |raw: &String| -> std::result::Result<(), String> {
                        inputs::validate(field, raw).map_err(|e| e.to_string())
                    })
                    .interact_text_on(&self.term)?
            }
        };

        self.session.edit(field, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lists_fields_then_actions() {
        let session = Session::default();
        let items = menu(&session);

        assert_eq!(items.len(), Field::ALL.len() + 2);
        assert_eq!(items[0].0, Action::Edit(Field::HomeAndIncome));
        assert_eq!(items[7].1, "Bedrooms: 3");
        assert_eq!(items[items.len() - 2], (Action::Predict, PREDICT_ACTION.to_string()));
        assert_eq!(items[items.len() - 1].0, Action::Quit);
    }
}
