//! Table Builder State
//!
//! User-defined tables on the project page: structural edits plus per-cell
//! content-type assignment via drag targets. Every row always has exactly
//! one cell per header.

use dragdrop_state::{DragSlot, DropHover};
use serde::{Deserialize, Serialize};

/// Content behavior assigned to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// No tool dropped yet
    #[default]
    Unset,
    /// Select control fed by a per-cell option list
    Dropdown,
    /// Free text input
    Text,
}

/// Per-cell assignment state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellState {
    pub kind: CellKind,
    /// Dropdown options, in insertion order
    pub options: Vec<String>,
    /// Selected (dropdown) or entered (text) value
    pub value: String,
}

impl CellState {
    pub fn is_unset(&self) -> bool {
        self.kind == CellKind::Unset
    }
}

/// A user-defined table: headers, row content, and cell assignments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    cells: Vec<Vec<CellState>>,
}

impl Table {
    /// Build a table from an arbitrary initial shape. Rows are padded or
    /// truncated to the header count so the width invariant holds from the
    /// first observable state.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }
        let cells = rows
            .iter()
            .map(|_| vec![CellState::default(); width])
            .collect();
        Self {
            headers,
            rows,
            cells,
        }
    }

    /// The fixed 3-header/1-row shape dropped from the table swatch
    pub fn skeleton() -> Self {
        Self::new(
            vec![
                "Header 1".to_string(),
                "Header 2".to_string(),
                "Header 3".to_string(),
            ],
            vec![vec![
                "Row 1 Col 1".to_string(),
                "Row 1 Col 2".to_string(),
                "Row 1 Col 3".to_string(),
            ]],
        )
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellState> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Append a header and one blank cell to every row, atomically
    pub fn add_column(&mut self) {
        self.headers.push(format!("Header {}", self.headers.len() + 1));
        for row in &mut self.rows {
            row.push(String::new());
        }
        for row in &mut self.cells {
            row.push(CellState::default());
        }
    }

    /// Append a blank row pre-sized to the current header count
    pub fn add_row(&mut self) {
        let width = self.headers.len();
        self.rows.push(vec![String::new(); width]);
        self.cells.push(vec![CellState::default(); width]);
    }

    /// Replace a header's text in place
    pub fn set_header(&mut self, index: usize, text: impl Into<String>) {
        if let Some(header) = self.headers.get_mut(index) {
            *header = text.into();
        }
    }

    /// Assign dropdown or text behavior to a previously unassigned cell.
    /// Assignment is one-way: already-assigned cells are left alone.
    /// Returns whether the assignment happened.
    pub fn set_cell_kind(&mut self, row: usize, col: usize, kind: CellKind) -> bool {
        if kind == CellKind::Unset {
            return false;
        }
        match self.cell_mut(row, col) {
            Some(cell) if cell.is_unset() => {
                cell.kind = kind;
                true
            }
            _ => false,
        }
    }

    /// Append a trimmed, non-empty, not-yet-present option to a dropdown
    /// cell. Blank or duplicate submissions are silently ignored.
    pub fn add_dropdown_option(&mut self, row: usize, col: usize, option: &str) {
        let option = option.trim();
        if option.is_empty() {
            return;
        }
        if let Some(cell) = self.cell_mut(row, col) {
            if cell.kind == CellKind::Dropdown && !cell.options.iter().any(|o| o == option) {
                cell.options.push(option.to_string());
            }
        }
    }

    /// Set a dropdown cell's selected value. The value is not checked
    /// against the option list; the underlying control owns that.
    pub fn set_dropdown_value(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if let Some(cell) = self.cell_mut(row, col) {
            if cell.kind == CellKind::Dropdown {
                cell.value = value.into();
            }
        }
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut CellState> {
        self.cells.get_mut(row).and_then(|r| r.get_mut(col))
    }
}

/// Tool swatches draggable from the project sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableTool {
    /// Creates a skeleton table when dropped on the zone
    Table,
    /// Assigns dropdown behavior when dropped on a cell
    Dropdown,
    /// Assigns free-text behavior when dropped on a cell
    TextField,
}

/// Address of a cell drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellAddr {
    pub table: usize,
    pub row: usize,
    pub col: usize,
}

/// Where a tool drag is currently hovering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolTarget {
    /// The table drop zone
    Zone,
    /// A single cell inside a table
    Cell(CellAddr),
}

/// The project page's table builder: the table list plus the active tool
/// drag. Tool drops resolve against the hovered target, mirroring how the
/// pointer actually lands.
#[derive(Debug, Default)]
pub struct TableBuilder {
    tables: Vec<Table>,
    tool_drag: DragSlot<TableTool>,
    hover: DropHover<ToolTarget>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table_mut(&mut self, index: usize) -> Option<&mut Table> {
        self.tables.get_mut(index)
    }

    /// Append a fully-formed table
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    pub fn begin_tool_drag(&mut self, tool: TableTool) {
        self.tool_drag.begin(tool);
    }

    pub fn hover_enter(&mut self, target: ToolTarget) {
        self.hover.enter(target);
    }

    pub fn hover_leave(&mut self, target: ToolTarget) {
        self.hover.leave(&target);
    }

    pub fn is_over(&self, target: ToolTarget) -> bool {
        self.hover.is_over(&target)
    }

    /// Resolve the active tool drag against the hovered target. Targets
    /// only accept their matching tools (the zone takes tables, cells take
    /// dropdowns and text fields); anything else just clears the gesture.
    pub fn commit_tool_drop(&mut self) {
        let tool = self.tool_drag.take();
        let target = self.hover.current().copied();
        self.hover.clear();

        match (tool, target) {
            (Some(TableTool::Table), Some(ToolTarget::Zone)) => {
                self.add_table(Table::skeleton());
            }
            (Some(TableTool::Dropdown), Some(ToolTarget::Cell(addr))) => {
                if let Some(table) = self.tables.get_mut(addr.table) {
                    table.set_cell_kind(addr.row, addr.col, CellKind::Dropdown);
                }
            }
            (Some(TableTool::TextField), Some(ToolTarget::Cell(addr))) => {
                if let Some(table) = self.tables.get_mut(addr.table) {
                    table.set_cell_kind(addr.row, addr.col, CellKind::Text);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_widths(table: &Table) {
        let width = table.headers().len();
        for row in table.rows() {
            assert_eq!(row.len(), width);
        }
        for row in 0..table.rows().len() {
            assert!(table.cell(row, width - 1).is_some());
            assert!(table.cell(row, width).is_none());
        }
    }

    #[test]
    fn test_skeleton_shape() {
        let table = Table::skeleton();
        assert_eq!(table.headers().len(), 3);
        assert_eq!(table.rows().len(), 1);
        assert_widths(&table);
    }

    #[test]
    fn test_ragged_rows_are_normalized() {
        let table = Table::new(
            vec!["A".into(), "B".into()],
            vec![vec!["only one".into()], vec!["x".into(), "y".into(), "extra".into()]],
        );
        assert_widths(&table);
        assert_eq!(table.rows()[0], vec!["only one".to_string(), String::new()]);
        assert_eq!(table.rows()[1], vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_structural_edits_keep_widths() {
        let mut table = Table::skeleton();
        table.add_row();
        table.add_column();
        table.add_row();
        table.add_column();
        assert_eq!(table.headers().len(), 5);
        assert_eq!(table.rows().len(), 3);
        assert_widths(&table);
    }

    #[test]
    fn test_added_header_is_numbered() {
        let mut table = Table::skeleton();
        table.add_column();
        assert_eq!(table.headers()[3], "Header 4");
    }

    #[test]
    fn test_cell_kind_is_one_way() {
        let mut table = Table::skeleton();
        assert!(table.set_cell_kind(0, 0, CellKind::Dropdown));
        assert!(!table.set_cell_kind(0, 0, CellKind::Text));
        assert_eq!(table.cell(0, 0).unwrap().kind, CellKind::Dropdown);
        assert!(!table.set_cell_kind(0, 1, CellKind::Unset));
    }

    #[test]
    fn test_dropdown_options_dedup_and_trim() {
        let mut table = Table::skeleton();
        table.set_cell_kind(0, 0, CellKind::Dropdown);
        table.add_dropdown_option(0, 0, "  Blocked ");
        table.add_dropdown_option(0, 0, "Blocked");
        table.add_dropdown_option(0, 0, "   ");
        table.add_dropdown_option(0, 0, "blocked");
        assert_eq!(
            table.cell(0, 0).unwrap().options,
            vec!["Blocked".to_string(), "blocked".to_string()]
        );
    }

    #[test]
    fn test_options_ignored_on_non_dropdown_cells() {
        let mut table = Table::skeleton();
        table.add_dropdown_option(0, 1, "nope");
        table.set_cell_kind(0, 2, CellKind::Text);
        table.add_dropdown_option(0, 2, "nope");
        assert!(table.cell(0, 1).unwrap().options.is_empty());
        assert!(table.cell(0, 2).unwrap().options.is_empty());
    }

    #[test]
    fn test_dropdown_value_unconstrained() {
        let mut table = Table::skeleton();
        table.set_cell_kind(0, 0, CellKind::Dropdown);
        table.set_dropdown_value(0, 0, "never added as an option");
        assert_eq!(table.cell(0, 0).unwrap().value, "never added as an option");
    }

    #[test]
    fn test_header_edit() {
        let mut table = Table::skeleton();
        table.set_header(1, "Owner");
        assert_eq!(table.headers()[1], "Owner");
        table.set_header(9, "out of range");
        assert_eq!(table.headers().len(), 3);
    }

    #[test]
    fn test_table_tool_drop_on_zone() {
        let mut builder = TableBuilder::new();
        builder.begin_tool_drag(TableTool::Table);
        builder.hover_enter(ToolTarget::Zone);
        builder.commit_tool_drop();
        assert_eq!(builder.tables().len(), 1);
        assert!(!builder.is_over(ToolTarget::Zone));
    }

    #[test]
    fn test_dropdown_tool_drop_on_cell() {
        let mut builder = TableBuilder::new();
        builder.add_table(Table::skeleton());
        let addr = CellAddr {
            table: 0,
            row: 0,
            col: 1,
        };
        builder.begin_tool_drag(TableTool::Dropdown);
        builder.hover_enter(ToolTarget::Cell(addr));
        builder.commit_tool_drop();
        assert_eq!(
            builder.tables()[0].cell(0, 1).unwrap().kind,
            CellKind::Dropdown
        );
    }

    #[test]
    fn test_mismatched_drop_clears_gesture() {
        let mut builder = TableBuilder::new();
        builder.add_table(Table::skeleton());
        builder.begin_tool_drag(TableTool::Table);
        builder.hover_enter(ToolTarget::Cell(CellAddr {
            table: 0,
            row: 0,
            col: 0,
        }));
        builder.commit_tool_drop();
        assert_eq!(builder.tables().len(), 1);
        assert!(builder.tables()[0].cell(0, 0).unwrap().is_unset());
    }
}
