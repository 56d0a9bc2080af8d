//! Raw form input and the rules that turn it into candidate entities.
//!
//! A draft is exactly what the operator typed: plain strings plus the
//! department selection. `build` runs one full validation pass over all
//! fields and only then yields a verdict, so every violation is
//! reported together.

use crate::domain::{Department, DomainError, Entity, Seller, ValidationAccumulator};
use crate::shared::format::{FormatConfig, try_parse_id};

const REQUIRED_MSG: &str = "Field can't be empty";

/// Raw field values for one entity type.
pub trait Draft: Clone + Send + Sync {
    type Entity: Entity;

    /// Build a candidate entity, accumulating field violations.
    /// `DomainError::Validation` carries every violation of the pass;
    /// `DomainError::Config` signals a wiring defect, not operator input.
    fn build(&self, fmt: &FormatConfig) -> Result<Self::Entity, DomainError>;

    /// Render an entity snapshot back into raw field text for editing.
    fn prefill(entity: &Self::Entity, fmt: &FormatConfig) -> Self;
}

#[derive(Debug, Clone, Default)]
pub struct DepartmentDraft {
    pub id_text: String,
    pub name: String,
}

impl Draft for DepartmentDraft {
    type Entity = Department;

    fn build(&self, _fmt: &FormatConfig) -> Result<Department, DomainError> {
        let mut acc = ValidationAccumulator::new();

        // Tolerant parse: clearing the id field turns an edit into a create.
        let id = try_parse_id(&self.id_text);

        if self.name.trim().is_empty() {
            acc.add_error("name", REQUIRED_MSG);
        }

        acc.raise_if_any()?;

        Ok(Department {
            id,
            name: self.name.clone(),
        })
    }

    fn prefill(entity: &Department, _fmt: &FormatConfig) -> Self {
        Self {
            id_text: entity.id.map(|id| id.to_string()).unwrap_or_default(),
            name: entity.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SellerDraft {
    pub id_text: String,
    pub name: String,
    pub email: String,
    pub birth_date_text: String,
    pub base_salary_text: String,
    /// Supplied by the selection collaborator; trusted, not validated.
    pub department: Option<Department>,
}

impl Draft for SellerDraft {
    type Entity = Seller;

    fn build(&self, fmt: &FormatConfig) -> Result<Seller, DomainError> {
        let mut acc = ValidationAccumulator::new();

        let id = try_parse_id(&self.id_text);

        if self.name.trim().is_empty() {
            acc.add_error("name", REQUIRED_MSG);
        }

        if self.email.trim().is_empty() {
            acc.add_error("email", REQUIRED_MSG);
        }

        let birth_date = if self.birth_date_text.trim().is_empty() {
            acc.add_error("birthDate", REQUIRED_MSG);
            None
        } else {
            match fmt.parse_date(&self.birth_date_text) {
                Some(date) => Some(date),
                None => {
                    acc.add_error("birthDate", "Invalid date");
                    None
                }
            }
        };

        let base_salary = if self.base_salary_text.trim().is_empty() {
            acc.add_error("baseSalary", REQUIRED_MSG);
            0.0
        } else {
            match fmt.parse_decimal(&self.base_salary_text) {
                Some(value) => value,
                None => {
                    acc.add_error("baseSalary", "Invalid number");
                    0.0
                }
            }
        };

        acc.raise_if_any()?;

        let department = self
            .department
            .clone()
            .ok_or_else(|| DomainError::Config("seller draft has no department selection".into()))?;

        Ok(Seller {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            birth_date,
            base_salary,
            department,
        })
    }

    fn prefill(entity: &Seller, fmt: &FormatConfig) -> Self {
        Self {
            id_text: entity.id.map(|id| id.to_string()).unwrap_or_default(),
            name: entity.name.clone(),
            email: entity.email.clone(),
            birth_date_text: entity
                .birth_date
                .map(|d| fmt.format_date(d))
                .unwrap_or_default(),
            base_salary_text: fmt.format_decimal(entity.base_salary),
            department: entity.department.id.map(|_| entity.department.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sales() -> Department {
        Department {
            id: Some(1),
            name: "Sales".to_string(),
        }
    }

    #[test]
    fn empty_department_name_is_a_field_error() {
        let draft = DepartmentDraft {
            id_text: String::new(),
            name: "   ".to_string(),
        };
        match draft.build(&FormatConfig::default()) {
            Err(DomainError::Validation(errors)) => {
                assert_eq!(errors.get("name"), Some("Field can't be empty"));
                assert_eq!(errors.len(), 1);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn id_text_routes_between_create_and_update() {
        let fmt = FormatConfig::default();
        for (text, expected) in [("", None), ("abc", None), ("42", Some(42))] {
            let draft = DepartmentDraft {
                id_text: text.to_string(),
                name: "Sales".to_string(),
            };
            assert_eq!(draft.build(&fmt).unwrap().id, expected, "id text {text:?}");
        }
    }

    #[test]
    fn seller_violations_accumulate_across_all_fields() {
        let draft = SellerDraft {
            id_text: String::new(),
            name: "Ann".to_string(),
            email: String::new(),
            birth_date_text: String::new(),
            base_salary_text: String::new(),
            department: Some(sales()),
        };
        match draft.build(&FormatConfig::default()) {
            Err(DomainError::Validation(errors)) => {
                assert!(errors.contains("email"));
                assert!(errors.contains("birthDate"));
                assert!(errors.contains("baseSalary"));
                assert!(!errors.contains("name"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_date_and_salary_are_field_errors_not_crashes() {
        let draft = SellerDraft {
            id_text: String::new(),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            birth_date_text: "31-31-1990".to_string(),
            base_salary_text: "lots".to_string(),
            department: Some(sales()),
        };
        match draft.build(&FormatConfig::default()) {
            Err(DomainError::Validation(errors)) => {
                assert_eq!(errors.get("birthDate"), Some("Invalid date"));
                assert_eq!(errors.get("baseSalary"), Some("Invalid number"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn well_formed_seller_builds_with_parsed_values() {
        let draft = SellerDraft {
            id_text: "7".to_string(),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            birth_date_text: "31/12/1990".to_string(),
            base_salary_text: "2.500,50".to_string(),
            department: Some(sales()),
        };
        let seller = draft.build(&FormatConfig::default()).unwrap();
        assert_eq!(seller.id, Some(7));
        assert_eq!(seller.birth_date, NaiveDate::from_ymd_opt(1990, 12, 31));
        assert_eq!(seller.base_salary, 2500.50);
        assert_eq!(seller.department, sales());
    }

    #[test]
    fn missing_department_selection_is_a_wiring_defect() {
        let draft = SellerDraft {
            id_text: String::new(),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            birth_date_text: "31/12/1990".to_string(),
            base_salary_text: "2500,00".to_string(),
            department: None,
        };
        match draft.build(&FormatConfig::default()) {
            Err(DomainError::Config(_)) => {}
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn prefill_renders_snapshot_through_format_config() {
        let fmt = FormatConfig::default();
        let seller = Seller {
            id: Some(3),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 12, 31),
            base_salary: 2500.5,
            department: sales(),
        };
        let draft = SellerDraft::prefill(&seller, &fmt);
        assert_eq!(draft.id_text, "3");
        assert_eq!(draft.birth_date_text, "31/12/1990");
        assert_eq!(draft.base_salary_text, "2500,50");
        assert_eq!(draft.department, Some(sales()));

        let fresh = SellerDraft::prefill(&Seller::new(), &fmt);
        assert_eq!(fresh.id_text, "");
        assert_eq!(fresh.birth_date_text, "");
        assert_eq!(fresh.department, None);
    }
}
