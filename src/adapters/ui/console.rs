//! Implements InputPort. Inquire-based interactive menus and forms.
//!
//! Stands in for the original windowed UI: a menu loop per record type
//! with list / new / edit / delete, and entry forms that redisplay
//! per-field messages on invalid input.

use crate::domain::{Department, DomainError, Entity, Seller};
use crate::ports::{ConfirmPort, InputPort};
use crate::shared::format::FormatConfig;
use crate::usecases::drafts::{DepartmentDraft, SellerDraft};
use crate::usecases::form_session::{FormSession, SubmitOutcome};
use crate::usecases::list_session::ListSession;
use crate::usecases::notifier::ChangeNotifier;
use inquire::{Confirm, InquireError, Select, Text};
use std::sync::Arc;
use tracing::error;

/// Yes/no prompt over the console.
pub struct InquireConfirm;

impl ConfirmPort for InquireConfirm {
    fn ask(&self, title: &str, message: &str) -> bool {
        Confirm::new(&format!("{title}: {message}"))
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }
}

/// Console adapter. Owns the two list sessions and opens form sessions
/// against their services.
pub struct ConsoleUi {
    departments: Arc<ListSession<Department>>,
    sellers: Arc<ListSession<Seller>>,
    notifier: ChangeNotifier,
    fmt: FormatConfig,
}

impl ConsoleUi {
    pub fn new(
        departments: Arc<ListSession<Department>>,
        sellers: Arc<ListSession<Seller>>,
        notifier: ChangeNotifier,
        fmt: FormatConfig,
    ) -> Self {
        Self {
            departments,
            sellers,
            notifier,
            fmt,
        }
    }

    fn department_menu(&self) -> Result<(), DomainError> {
        loop {
            let Some(action) = prompt_select(
                "Departments",
                vec!["List", "New", "Edit", "Delete", "Back"],
            )?
            else {
                return Ok(());
            };
            match action {
                "List" => self.print_departments(),
                "New" => self.department_form(Department::new())?,
                "Edit" => {
                    if let Some(dept) = self.pick_department("Edit which department?")? {
                        self.department_form(dept)?;
                    }
                }
                "Delete" => {
                    if let Some(dept) = self.pick_department("Delete which department?")? {
                        self.remove_entity(&self.departments, &dept)?;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn seller_menu(&self) -> Result<(), DomainError> {
        loop {
            let Some(action) =
                prompt_select("Sellers", vec!["List", "New", "Edit", "Delete", "Back"])?
            else {
                return Ok(());
            };
            match action {
                "List" => self.print_sellers(),
                "New" => self.seller_form(Seller::new())?,
                "Edit" => {
                    if let Some(seller) = self.pick_seller("Edit which seller?")? {
                        self.seller_form(seller)?;
                    }
                }
                "Delete" => {
                    if let Some(seller) = self.pick_seller("Delete which seller?")? {
                        self.remove_entity(&self.sellers, &seller)?;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn print_departments(&self) {
        let items = self.departments.items();
        if items.is_empty() {
            println!("(no departments)");
            return;
        }
        for d in items {
            println!("{:>4}  {}", d.id.unwrap_or_default(), d.name);
        }
    }

    fn print_sellers(&self) {
        let items = self.sellers.items();
        if items.is_empty() {
            println!("(no sellers)");
            return;
        }
        for s in items {
            let birth = s
                .birth_date
                .map(|d| self.fmt.format_date(d))
                .unwrap_or_default();
            println!(
                "{:>4}  {:<20} {:<28} {:<12} {:>12}  {}",
                s.id.unwrap_or_default(),
                s.name,
                s.email,
                birth,
                self.fmt.format_decimal(s.base_salary),
                s.department.name,
            );
        }
    }

    fn pick_department(&self, label: &str) -> Result<Option<Department>, DomainError> {
        pick(label, self.departments.items(), |d| {
            format!("{} ({})", d.name, d.id.unwrap_or_default())
        })
    }

    fn pick_seller(&self, label: &str) -> Result<Option<Seller>, DomainError> {
        pick(label, self.sellers.items(), |s| {
            format!("{} ({})", s.name, s.id.unwrap_or_default())
        })
    }

    fn remove_entity<T: Entity>(
        &self,
        list: &Arc<ListSession<T>>,
        entity: &T,
    ) -> Result<(), DomainError> {
        match list.remove(entity, &InquireConfirm) {
            Ok(true) => println!("Deleted."),
            Ok(false) => {}
            Err(DomainError::Integrity(msg)) | Err(DomainError::Persistence(msg)) => {
                println!("Error removing object: {msg}");
            }
            Err(other) => return Err(other),
        }
        Ok(())
    }

    /// Department entry form. Redisplays with per-field messages until
    /// the save succeeds or the operator cancels.
    fn department_form(&self, entity: Department) -> Result<(), DomainError> {
        let mut session = FormSession::<DepartmentDraft>::new(
            entity,
            self.departments.service().clone(),
            self.notifier.clone(),
            self.fmt.clone(),
        );
        let mut draft = session.draft();
        loop {
            let Some(name) = prompt_text("Name:", &draft.name)? else {
                return Ok(());
            };
            draft.name = name;

            match session.submit(&draft)? {
                SubmitOutcome::Saved => return Ok(()),
                SubmitOutcome::Invalid(errors) => print_field_errors(&errors),
                SubmitOutcome::SaveFailed(msg) => println!("Error saving object: {msg}"),
            }
        }
    }

    /// Seller entry form. The department selection collaborator offers
    /// every persisted department; a brand-new seller defaults to the
    /// first one.
    fn seller_form(&self, entity: Seller) -> Result<(), DomainError> {
        let departments = self.departments.service().list()?;
        if departments.is_empty() {
            println!("Create a department first.");
            return Ok(());
        }

        let mut session = FormSession::<SellerDraft>::new(
            entity,
            self.sellers.service().clone(),
            self.notifier.clone(),
            self.fmt.clone(),
        );
        let mut draft = session.draft();
        if draft.department.is_none() {
            draft.department = departments.first().cloned();
        }

        loop {
            let Some(name) = prompt_text("Name:", &draft.name)? else {
                return Ok(());
            };
            draft.name = name;
            let Some(email) = prompt_text("Email:", &draft.email)? else {
                return Ok(());
            };
            draft.email = email;
            let Some(birth) = prompt_text("Birth date:", &draft.birth_date_text)? else {
                return Ok(());
            };
            draft.birth_date_text = birth;
            let Some(salary) = prompt_text("Base salary:", &draft.base_salary_text)? else {
                return Ok(());
            };
            draft.base_salary_text = salary;
            let Some(dept) = pick_with_default("Department:", &departments, &draft.department)?
            else {
                return Ok(());
            };
            draft.department = Some(dept);

            match session.submit(&draft)? {
                SubmitOutcome::Saved => return Ok(()),
                SubmitOutcome::Invalid(errors) => print_field_errors(&errors),
                SubmitOutcome::SaveFailed(msg) => println!("Error saving object: {msg}"),
            }
        }
    }
}

impl InputPort for ConsoleUi {
    fn run(&self) -> Result<(), DomainError> {
        loop {
            let Some(choice) = prompt_select("salesdesk", vec!["Departments", "Sellers", "Quit"])?
            else {
                return Ok(());
            };
            let result = match choice {
                "Departments" => self.department_menu(),
                "Sellers" => self.seller_menu(),
                _ => return Ok(()),
            };
            if let Err(e) = result {
                // Config errors are wiring defects; abort loudly.
                error!(error = %e, "menu action failed");
                return Err(e);
            }
        }
    }
}

fn print_field_errors(errors: &crate::domain::FieldErrorSet) {
    for (field, message) in errors.iter() {
        println!("  {field}: {message}");
    }
}

/// `None` means the operator cancelled (Esc / Ctrl-C): close without
/// submitting, no side effects.
fn prompt_text(label: &str, initial: &str) -> Result<Option<String>, DomainError> {
    match Text::new(label).with_initial_value(initial).prompt() {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Config(format!("console unavailable: {e}"))),
    }
}

fn prompt_select<'a>(
    label: &str,
    options: Vec<&'a str>,
) -> Result<Option<&'a str>, DomainError> {
    match Select::new(label, options).prompt() {
        Ok(choice) => Ok(Some(choice)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Config(format!("console unavailable: {e}"))),
    }
}

fn pick<T>(
    label: &str,
    mut items: Vec<T>,
    display: impl Fn(&T) -> String,
) -> Result<Option<T>, DomainError> {
    if items.is_empty() {
        println!("(nothing to select)");
        return Ok(None);
    }
    let labels: Vec<String> = items.iter().map(&display).collect();
    match Select::new(label, labels.clone()).prompt() {
        Ok(choice) => Ok(labels
            .iter()
            .position(|l| *l == choice)
            .map(|i| items.swap_remove(i))),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Config(format!("console unavailable: {e}"))),
    }
}

fn pick_with_default(
    label: &str,
    departments: &[Department],
    current: &Option<Department>,
) -> Result<Option<Department>, DomainError> {
    let start = current
        .as_ref()
        .and_then(|c| departments.iter().position(|d| d.id == c.id))
        .unwrap_or(0);
    let labels: Vec<String> = departments.iter().map(|d| d.name.clone()).collect();
    match Select::new(label, labels.clone())
        .with_starting_cursor(start)
        .prompt()
    {
        Ok(choice) => {
            let index = labels.iter().position(|l| *l == choice);
            Ok(index.map(|i| departments[i].clone()))
        }
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Config(format!("console unavailable: {e}"))),
    }
}
