//! Management screen state
//!
//! `handle(event)` 只修改状态并返回副作用列表 ([`Effect`])，不做任何 IO；
//! 副作用由 runner 执行，结果再以事件形式送回。

use std::path::PathBuf;

use shared::{
    Branch, BranchCreate, BranchListQuery, BranchPage, BranchStatus, BranchUpdate, SortField,
    SortOrder,
};

/// Page size options offered by the grid
pub const PAGE_SIZE_OPTIONS: [u64; 3] = [5, 10, 20];
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Grid presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Table => Self::Cards,
            Self::Cards => Self::Table,
        }
    }
}

/// Editable text fields of the add/edit dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Code,
    Address,
    City,
    State,
    Phone,
    Email,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::Code,
        FormField::Address,
        FormField::City,
        FormField::State,
        FormField::Phone,
        FormField::Email,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Code => "Code",
            Self::Address => "Address",
            Self::City => "City",
            Self::State => "State",
            Self::Phone => "Phone",
            Self::Email => "Email",
        }
    }
}

/// Add / edit dialog values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchForm {
    /// `Some` when editing an existing branch
    pub id: Option<String>,
    pub name: String,
    pub code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub email: String,
    pub status: BranchStatus,
}

impl BranchForm {
    /// Blank form, status `active`
    pub fn empty() -> Self {
        Self::default()
    }

    /// Form pre-filled with a stored branch (including its id)
    pub fn from_branch(branch: &Branch) -> Self {
        Self {
            id: Some(branch.id.clone()),
            name: branch.name.clone(),
            code: branch.code.clone(),
            address: branch.address.clone(),
            city: branch.city.clone(),
            state: branch.state.clone(),
            phone: branch.phone.clone().unwrap_or_default(),
            email: branch.email.clone().unwrap_or_default(),
            status: branch.status,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Code => &self.code,
            FormField::Address => &self.address,
            FormField::City => &self.city,
            FormField::State => &self.state,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Code => self.code = value,
            FormField::Address => self.address = value,
            FormField::City => self.city = value,
            FormField::State => self.state = value,
            FormField::Phone => self.phone = value,
            FormField::Email => self.email = value,
        }
    }

    /// Create payload; blank optional fields are left out
    pub fn to_create(&self) -> BranchCreate {
        BranchCreate {
            name: Some(self.name.clone()),
            code: Some(self.code.clone()),
            address: Some(self.address.clone()),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            phone: non_blank(&self.phone),
            email: non_blank(&self.email),
            status: Some(self.status),
        }
    }

    /// Update payload carrying every form field
    pub fn to_update(&self) -> BranchUpdate {
        BranchUpdate {
            name: Some(self.name.clone()),
            code: Some(self.code.clone()),
            address: Some(self.address.clone()),
            city: Some(self.city.clone()),
            state: Some(self.state.clone()),
            phone: Some(self.phone.clone()),
            email: Some(self.email.clone()),
            status: Some(self.status),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchList(BranchListQuery),
    Create(BranchCreate),
    Update { id: String, data: BranchUpdate },
    Delete { id: String },
    Import { path: PathBuf },
    Export { path: PathBuf, branches: Vec<Branch> },
}

/// Management screen events (user input and effect outcomes)
#[derive(Debug, Clone, PartialEq)]
pub enum ManagementEvent {
    Mounted,
    Refresh,
    PageChanged(u64),
    NextPage,
    PrevPage,
    PageSizeChanged(u64),
    SearchChanged(String),
    SortChanged(SortField),
    ListLoaded(BranchPage),
    ListFailed(String),

    AddRequested,
    EditRequested(Branch),
    FormChanged(FormField, String),
    FormStatusToggled,
    DialogConfirmed,
    DialogCancelled,
    /// `None` when an update hit a branch that no longer exists
    SaveSucceeded(Option<Branch>),
    SaveFailed(String),

    DeleteRequested(Branch),
    DeleteConfirmed,
    DeleteCancelled,
    DeleteSucceeded,
    DeleteFailed(String),

    ImportRequested(PathBuf),
    ImportFinished { imported: usize },
    ImportFailed { imported: usize, message: String },
    ExportRequested(PathBuf),
    ExportFinished { path: PathBuf, rows: usize },
    ExportFailed(String),

    ViewToggled,
    FullscreenToggled,
}

/// Management screen state
#[derive(Debug, Clone, PartialEq)]
pub struct ManagementState {
    /// Zero-based page index, as the grid counts
    pub page: u64,
    pub page_size: u64,
    /// Server-reported page count of the last list response
    pub total_pages: u64,
    /// `total_pages * page_size`; over-counts when the last page is partial
    pub total_rows: u64,
    pub search: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// Currently loaded page
    pub branches: Vec<Branch>,
    pub loading: bool,
    pub dialog: Option<BranchForm>,
    pub pending_delete: Option<Branch>,
    pub view_mode: ViewMode,
    pub fullscreen: bool,
    /// Last failure, shown in the status line
    pub error: Option<String>,
    /// Last informational message (import / export results)
    pub notice: Option<String>,
}

impl Default for ManagementState {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            total_rows: 0,
            search: String::new(),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            branches: Vec::new(),
            loading: false,
            dialog: None,
            pending_delete: None,
            view_mode: ViewMode::default(),
            fullscreen: false,
            error: None,
            notice: None,
        }
    }
}

impl ManagementState {
    /// List request for the current page / size / search / sort
    pub fn query(&self) -> BranchListQuery {
        BranchListQuery::new(self.page as i64 + 1, self.page_size as i64)
            .with_search(self.search.clone())
            .with_sort(self.sort_field, self.sort_order)
    }

    fn fetch(&mut self) -> Vec<Effect> {
        self.loading = true;
        vec![Effect::FetchList(self.query())]
    }

    fn go_to_page(&mut self, page: u64) -> Vec<Effect> {
        if page == self.page {
            return Vec::new();
        }
        self.page = page;
        self.fetch()
    }

    /// Apply one event and return the effects it requests
    pub fn handle(&mut self, event: ManagementEvent) -> Vec<Effect> {
        match event {
            ManagementEvent::Mounted | ManagementEvent::Refresh => self.fetch(),
            ManagementEvent::PageChanged(page) => self.go_to_page(page),
            ManagementEvent::NextPage => {
                if self.page + 1 < self.total_pages {
                    self.go_to_page(self.page + 1)
                } else {
                    Vec::new()
                }
            }
            ManagementEvent::PrevPage => self.go_to_page(self.page.saturating_sub(1)),
            ManagementEvent::PageSizeChanged(size) => {
                if size == 0 || size == self.page_size {
                    return Vec::new();
                }
                self.page_size = size;
                self.fetch()
            }
            ManagementEvent::SearchChanged(search) => {
                if search == self.search {
                    return Vec::new();
                }
                self.search = search;
                self.fetch()
            }
            ManagementEvent::SortChanged(field) => {
                if field == self.sort_field {
                    self.sort_order = match self.sort_order {
                        SortOrder::Asc => SortOrder::Desc,
                        SortOrder::Desc => SortOrder::Asc,
                    };
                } else {
                    self.sort_field = field;
                    self.sort_order = SortOrder::Asc;
                }
                self.fetch()
            }
            ManagementEvent::ListLoaded(page) => {
                self.loading = false;
                self.total_pages = page.total_pages;
                self.total_rows = page.total_pages * self.page_size;
                self.branches = page.branches;
                Vec::new()
            }
            ManagementEvent::ListFailed(message) => {
                self.loading = false;
                self.error = Some(message);
                Vec::new()
            }

            ManagementEvent::AddRequested => {
                self.dialog = Some(BranchForm::empty());
                Vec::new()
            }
            ManagementEvent::EditRequested(branch) => {
                self.dialog = Some(BranchForm::from_branch(&branch));
                Vec::new()
            }
            ManagementEvent::FormChanged(field, value) => {
                if let Some(form) = self.dialog.as_mut() {
                    form.set(field, value);
                }
                Vec::new()
            }
            ManagementEvent::FormStatusToggled => {
                if let Some(form) = self.dialog.as_mut() {
                    form.status = form.status.toggled();
                }
                Vec::new()
            }
            ManagementEvent::DialogConfirmed => match &self.dialog {
                Some(form) => match &form.id {
                    Some(id) => vec![Effect::Update {
                        id: id.clone(),
                        data: form.to_update(),
                    }],
                    None => vec![Effect::Create(form.to_create())],
                },
                None => Vec::new(),
            },
            ManagementEvent::DialogCancelled => {
                self.dialog = None;
                Vec::new()
            }
            ManagementEvent::SaveSucceeded(_) => {
                self.dialog = None;
                self.error = None;
                self.fetch()
            }
            ManagementEvent::SaveFailed(message) => {
                self.error = Some(message);
                Vec::new()
            }

            ManagementEvent::DeleteRequested(branch) => {
                self.pending_delete = Some(branch);
                Vec::new()
            }
            ManagementEvent::DeleteConfirmed => match self.pending_delete.take() {
                Some(branch) => vec![Effect::Delete { id: branch.id }],
                None => Vec::new(),
            },
            ManagementEvent::DeleteCancelled => {
                self.pending_delete = None;
                Vec::new()
            }
            ManagementEvent::DeleteSucceeded => self.fetch(),
            ManagementEvent::DeleteFailed(message) => {
                self.error = Some(message);
                Vec::new()
            }

            ManagementEvent::ImportRequested(path) => {
                self.loading = true;
                vec![Effect::Import { path }]
            }
            ManagementEvent::ImportFinished { imported } => {
                self.notice = Some(format!("Imported {imported} branch(es)"));
                self.fetch()
            }
            ManagementEvent::ImportFailed { imported, message } => {
                self.loading = false;
                self.error = Some(format!(
                    "Import stopped after {imported} branch(es): {message}"
                ));
                Vec::new()
            }
            ManagementEvent::ExportRequested(path) => vec![Effect::Export {
                path,
                branches: self.branches.clone(),
            }],
            ManagementEvent::ExportFinished { path, rows } => {
                self.notice = Some(format!("Exported {rows} branch(es) to {}", path.display()));
                Vec::new()
            }
            ManagementEvent::ExportFailed(message) => {
                self.error = Some(message);
                Vec::new()
            }

            ManagementEvent::ViewToggled => {
                self.view_mode = self.view_mode.toggled();
                Vec::new()
            }
            ManagementEvent::FullscreenToggled => {
                self.fullscreen = !self.fullscreen;
                Vec::new()
            }
        }
    }
}
