//! Module: runtime::table
//! Responsibility: the DataTable component — list state, cell
//! formatting, permission-gated affordances, and the row-editor dialog
//! state machine.
//! Does not own: list semantics (engine query), reference resolution
//! internals, or rule evaluation (engine validate).

use crate::runtime::{Runtime, default_label};
use panelkit_core::{
    query::{Filter, ListParams, Pagination, Sort, SortOrder},
    record::{self, Record},
    reference::ReferenceIndex,
    store::ResourceBackend,
    validate::{FieldErrors, check_rule},
    value::display_text,
};
use panelkit_schema::{ColumnDef, DataTableProps, FieldType, SelectOption};
use serde_json::Value;
use std::collections::BTreeMap;
use time::{Date, format_description::well_known::Iso8601, macros::format_description};


///
/// TableState
///
/// The user-driven list state: page window, sort, filter control
/// values, and the search box.
///

#[derive(Clone, Debug)]
pub struct TableState {
    pub page: usize,
    pub per_page: usize,
    pub sort: Sort,
    pub filter_values: BTreeMap<String, String>,
    pub search: String,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            sort: Sort::asc("id"),
            filter_values: BTreeMap::new(),
            search: String::new(),
        }
    }
}

///
/// EditorMode
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

///
/// RowEditor
///
/// The create/edit dialog. Lifecycle: closed → open (prefilled) →
/// submitting → closed on success; a validation or store failure keeps
/// it open with its errors in place.
///

#[derive(Clone, Debug)]
pub struct RowEditor {
    pub mode: EditorMode,
    pub values: Record,
    pub errors: FieldErrors,
    pub form_error: Option<String>,
    pub submitting: bool,
}

///
/// DataTable
///
/// One mounted table: its props, list state, and dialog state. Reads go
/// through [`DataTable::view`]; mutations go through the editor and
/// delete flows, which re-read on success.
///

#[derive(Clone, Debug)]
pub struct DataTable {
    props: DataTableProps,
    pub state: TableState,
    pub editor: Option<RowEditor>,
    pub pending_delete: Option<String>,
    error: Option<String>,
}

///
/// TableView
///

#[derive(Clone, Debug)]
pub struct TableView {
    pub resource: String,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<TableRow>,
    pub total: usize,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub show_pagination: bool,
    pub page: usize,
    pub per_page: usize,
    /// 1-based "Showing X to Y of Z" bounds; `(0, 0)` when empty.
    pub showing: (usize, usize),
    pub can_previous: bool,
    pub can_next: bool,
    pub error: Option<String>,
}

///
/// ColumnHeader
///

#[derive(Clone, Debug)]
pub struct ColumnHeader {
    pub field: String,
    pub label: String,
    /// Present when this column is the active sort.
    pub sorted: Option<SortOrder>,
}

///
/// TableRow
///

#[derive(Clone, Debug)]
pub struct TableRow {
    pub id: Option<String>,
    pub cells: Vec<String>,
    /// The raw record, for prefilled edit dialogs.
    pub record: Record,
}

impl DataTable {
    #[must_use]
    pub fn new(props: DataTableProps) -> Self {
        Self {
            props,
            state: TableState::default(),
            editor: None,
            pending_delete: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn props(&self) -> &DataTableProps {
        &self.props
    }

    // -- list state ------------------------------------------------------

    /// Column-header click: flip the active sort or restart ascending on
    /// a new field.
    pub fn toggle_sort(&mut self, field: &str) {
        self.state.sort = self.state.sort.toggled(field);
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.page = page.max(1);
    }

    /// Set a filter control's value; an empty value clears the control.
    pub fn set_filter(&mut self, field: &str, value: &str) {
        if value.is_empty() {
            self.state.filter_values.remove(field);
        } else {
            self.state
                .filter_values
                .insert(field.to_string(), value.to_string());
        }
        self.state.page = 1;
    }

    pub fn set_search(&mut self, query: &str) {
        self.state.search = query.to_string();
        self.state.page = 1;
    }

    // The effective store filter: control values, plus the search query
    // written into every text/select column as an equality entry (AND
    // across columns — the inherited search shape).
    fn effective_filter(&self) -> Filter {
        let mut filter: Filter = self
            .state
            .filter_values
            .iter()
            .map(|(field, value)| (field.clone(), Value::String(value.clone())))
            .collect();

        if !self.state.search.is_empty() {
            for column in &self.props.columns {
                if matches!(column.kind, FieldType::Text | FieldType::Select) {
                    filter.insert(
                        column.field.clone(),
                        Value::String(self.state.search.clone()),
                    );
                }
            }
        }

        filter
    }

    // -- view ------------------------------------------------------------

    /// Read the current window and format it for display.
    #[must_use]
    pub fn view(&self, runtime: &Runtime, role: Option<&str>) -> TableView {
        let gate = runtime.gate();
        let can = |action: &str| {
            role.is_some_and(|role| gate.can_perform(role, &self.props.resource, action))
        };

        let params = ListParams {
            filter: Some(self.effective_filter()),
            sort: Some(self.state.sort.clone()),
            pagination: Some(Pagination {
                page: self.state.page,
                per_page: self.state.per_page,
            }),
        };

        let columns: Vec<ColumnHeader> = self
            .props
            .columns
            .iter()
            .map(|column| ColumnHeader {
                field: column.field.clone(),
                label: column_label(column),
                sorted: (self.state.sort.field == column.field).then_some(self.state.sort.order),
            })
            .collect();

        let listed = match runtime.store().get_list(&self.props.resource, &params) {
            Ok(result) => result,
            Err(_) => {
                return TableView {
                    resource: self.props.resource.clone(),
                    columns,
                    rows: Vec::new(),
                    total: 0,
                    can_create: self.props.allow_create && can("create"),
                    can_edit: self.props.allow_edit && can("update"),
                    can_delete: self.props.allow_delete && can("delete"),
                    show_pagination: self.props.pagination,
                    page: self.state.page,
                    per_page: self.state.per_page,
                    showing: (0, 0),
                    can_previous: false,
                    can_next: false,
                    error: Some("Failed to load data".to_string()),
                };
            }
        };

        let references = self.load_reference_indexes(runtime);
        let rows: Vec<TableRow> = listed
            .data
            .iter()
            .map(|row| TableRow {
                id: record::record_id(row).map(str::to_string),
                cells: self
                    .props
                    .columns
                    .iter()
                    .map(|column| cell_text(column, row, &references))
                    .collect(),
                record: row.clone(),
            })
            .collect();

        let total = listed.total;
        let showing = if rows.is_empty() {
            (0, 0)
        } else {
            (
                (self.state.page - 1) * self.state.per_page + 1,
                (self.state.page * self.state.per_page).min(total),
            )
        };

        TableView {
            resource: self.props.resource.clone(),
            columns,
            rows,
            total,
            can_create: self.props.allow_create && can("create"),
            can_edit: self.props.allow_edit && can("update"),
            can_delete: self.props.allow_delete && can("delete"),
            show_pagination: self.props.pagination,
            page: self.state.page,
            per_page: self.state.per_page,
            showing,
            can_previous: self.state.page > 1,
            can_next: self.state.page * self.state.per_page < total,
            error: self.error.clone(),
        }
    }

    // One fetch per referenced resource, then one index per reference
    // column. A failed fetch leaves that column resolving to raw values.
    fn load_reference_indexes(&self, runtime: &Runtime) -> BTreeMap<String, ReferenceIndex> {
        let mut fetched: BTreeMap<String, Vec<Record>> = BTreeMap::new();
        let mut indexes = BTreeMap::new();

        for column in &self.props.columns {
            let Some(reference) = column.reference.as_ref().filter(|_| {
                matches!(column.kind, FieldType::Reference)
            }) else {
                continue;
            };

            let records = fetched
                .entry(reference.resource.clone())
                .or_insert_with(|| {
                    runtime
                        .store()
                        .get_list(&reference.resource, &ListParams::match_all())
                        .map(|result| result.data)
                        .unwrap_or_default()
                });

            indexes.insert(
                column.field.clone(),
                ReferenceIndex::build(reference, records),
            );
        }

        indexes
    }

    // -- editor dialog ---------------------------------------------------

    /// Open the create dialog with empty values.
    pub fn open_create(&mut self) {
        self.editor = Some(RowEditor {
            mode: EditorMode::Create,
            values: Record::new(),
            errors: FieldErrors::new(),
            form_error: None,
            submitting: false,
        });
    }

    /// Open the edit dialog prefilled from one record.
    pub fn open_edit(&mut self, item: &Record) {
        let Some(id) = record::record_id(item) else {
            return;
        };

        self.editor = Some(RowEditor {
            mode: EditorMode::Edit { id: id.to_string() },
            values: item.clone(),
            errors: FieldErrors::new(),
            form_error: None,
            submitting: false,
        });
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Change one field of the open dialog, clearing its error.
    pub fn editor_change(&mut self, field: &str, value: Value) {
        if let Some(editor) = &mut self.editor {
            editor.values.insert(field.to_string(), value);
            editor.errors.remove(field);
        }
    }

    /// Validate the open dialog against the table's rules. Columns
    /// without a rule entry pass untouched.
    pub fn validate_editor(&mut self) -> bool {
        let Some(editor) = &mut self.editor else {
            return false;
        };

        let mut errors = FieldErrors::new();
        for column in &self.props.columns {
            let Some(rule) = self.props.form_validation_rules.get(&column.field) else {
                continue;
            };
            if let Some(message) =
                check_rule(&column_label(column), rule, editor.values.get(&column.field))
            {
                errors.insert(column.field.clone(), message);
            }
        }

        editor.errors = errors;
        editor.errors.is_empty()
    }

    /// Submit the open dialog: validation failure keeps it open with
    /// field errors, a store failure keeps it open with a form error,
    /// success commits and closes. Returns whether it closed.
    pub fn submit_editor(&mut self, runtime: &mut Runtime) -> bool {
        if !self.validate_editor() {
            return false;
        }
        let (mode, values) = {
            let Some(editor) = &mut self.editor else {
                return false;
            };
            editor.submitting = true;

            (editor.mode.clone(), editor.values.clone())
        };

        let outcome = match &mode {
            EditorMode::Create => runtime
                .store_mut()
                .create(&self.props.resource, values)
                .map(|_| ())
                .map_err(|_| "Failed to create item"),
            EditorMode::Edit { id } => runtime
                .store_mut()
                .update(&self.props.resource, id, &values)
                .map(|_| ())
                .map_err(|_| "Failed to update item"),
        };

        match outcome {
            Ok(()) => {
                self.editor = None;
                true
            }
            Err(message) => {
                if let Some(editor) = &mut self.editor {
                    editor.submitting = false;
                    editor.form_error = Some(message.to_string());
                }
                false
            }
        }
    }

    // -- delete dialog ---------------------------------------------------

    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirm the pending delete. A store failure surfaces on the table
    /// and leaves the confirmation open.
    pub fn confirm_delete(&mut self, runtime: &mut Runtime) -> bool {
        let Some(id) = self.pending_delete.clone() else {
            return false;
        };

        match runtime.store_mut().delete(&self.props.resource, &id) {
            Ok(_) => {
                self.pending_delete = None;
                true
            }
            Err(_) => {
                self.error = Some("Failed to delete item".to_string());
                false
            }
        }
    }
}

fn column_label(column: &ColumnDef) -> String {
    column
        .label
        .clone()
        .unwrap_or_else(|| default_label(&column.field))
}

// Format one cell for display: missing values dash out, booleans spell
// Yes/No, dates localize, references and labeled selects substitute
// their display side.
fn cell_text(
    column: &ColumnDef,
    row: &Record,
    references: &BTreeMap<String, ReferenceIndex>,
) -> String {
    let Some(value) = row.get(&column.field) else {
        return "-".to_string();
    };
    if value.is_null() {
        return "-".to_string();
    }

    match column.kind {
        FieldType::Boolean => {
            if value.as_bool() == Some(true) {
                "Yes".to_string()
            } else {
                "No".to_string()
            }
        }
        FieldType::Date => format_date(value),
        FieldType::Reference => references
            .get(&column.field)
            .map_or_else(|| display_text(value), |index| display_text(&index.resolve(value))),
        FieldType::Select => select_label(column.options.as_deref(), value),
        FieldType::Text | FieldType::Number => display_text(value),
    }
}

// `M/D/YYYY`, falling back to the raw text when the value does not
// parse as an ISO date.
fn format_date(value: &Value) -> String {
    let text = display_text(value);

    Date::parse(&text, &Iso8601::DEFAULT).map_or(text, |date| {
        date.format(format_description!(
            "[month padding:none]/[day padding:none]/[year]"
        ))
        .unwrap_or_else(|_| display_text(value))
    })
}

fn select_label(options: Option<&[SelectOption]>, value: &Value) -> String {
    let raw = display_text(value);

    options
        .and_then(|options| {
            options
                .iter()
                .find(|option| option.value() == raw)
                .map(|option| option.label().to_string())
        })
        .unwrap_or(raw)
}
