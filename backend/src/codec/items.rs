//! Item table parsing shared by every generation.

use super::value::{parse_float, parse_int};
use crate::models::LineItem;
use crate::schema::{col, LF_COLUMN};

/// Blank lines and summary/footer rows (`Total ...`) are not items.
pub fn is_skipped_row(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.to_lowercase().starts_with("total")
}

/// Hands out `item-1`, `item-2`, ... for the duration of one parse call.
#[derive(Debug, Default)]
pub struct ItemIds {
    issued: usize,
}

impl ItemIds {
    pub fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("item-{}", self.issued)
    }
}

/// Collects items row by row and tracks which ones carry LF = 1.
#[derive(Debug)]
pub struct ItemTableBuilder {
    lf_column: Option<usize>,
    ids: ItemIds,
    items: Vec<LineItem>,
    lf_indexes: Vec<usize>,
}

impl ItemTableBuilder {
    /// The LF column is found by name; the rest sit at fixed positions.
    pub fn new(headers: &[String]) -> Self {
        Self {
            lf_column: headers.iter().position(|h| h == LF_COLUMN),
            ids: ItemIds::default(),
            items: Vec::new(),
            lf_indexes: Vec::new(),
        }
    }

    pub fn push_row(&mut self, cells: &[String]) {
        let index = self.items.len();
        if let Some(lf) = self.lf_column {
            if cells.get(lf).map(String::as_str) == Some("1") {
                self.lf_indexes.push(index);
            }
        }
        self.items.push(parse_item(cells, self.ids.next_id()));
    }

    pub fn finish(self) -> (Vec<LineItem>, Vec<usize>) {
        (self.items, self.lf_indexes)
    }
}

fn parse_item(cells: &[String], item_id: String) -> LineItem {
    let text = |i: usize| cells.get(i).cloned().unwrap_or_default();
    let int = |i: usize| cells.get(i).and_then(|c| parse_int(c));

    LineItem {
        item_id: Some(item_id),
        width: int(col::WIDTH),
        height: int(col::HEIGHT),
        fabric_type: text(col::FABRIC_TYPE),
        line_price: cells.get(col::PRICE).and_then(|c| parse_float(c)),
        location: text(col::LOCATION),
        fabric: text(col::FABRIC),
        color: text(col::COLOR),
        over: text(col::OVER),
        oi: text(col::OI),
        lr: text(col::LR),
        dual: text(col::DUAL),
        chain: int(col::CHAIN),
        winder: text(col::WINDER),
        motor: text(col::MOTOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ITEM_COLUMNS;

    fn cells(line: &str) -> Vec<String> {
        line.split(',').map(str::to_string).collect()
    }

    #[test]
    fn test_skipped_rows() {
        assert!(is_skipped_row(""));
        assert!(is_skipped_row("   "));
        assert!(is_skipped_row("TOTAL,,,,450.00"));
        assert!(is_skipped_row("  Total items: 3"));
        assert!(!is_skipped_row("1,1200,1500"));
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut ids = ItemIds::default();
        assert_eq!(ids.next_id(), "item-1");
        assert_eq!(ids.next_id(), "item-2");
    }

    #[test]
    fn test_builder_parses_fixed_positions() {
        let headers: Vec<String> = ITEM_COLUMNS.iter().map(|s| s.to_string()).collect();
        let mut table = ItemTableBuilder::new(&headers);
        table.push_row(&cells("1,1200,1500,BO,199.90,Bed 1,Linen,White,,IN,L,,800,,Somfy,1"));
        table.push_row(&cells("2,abc,900,SN,,Kitchen,,,,OUT,R,Y,x,W,,0"));

        let (items, lf) = table.finish();
        assert_eq!(items.len(), 2);
        assert_eq!(lf, vec![0]);

        let first = &items[0];
        assert_eq!(first.item_id.as_deref(), Some("item-1"));
        assert_eq!(first.width, Some(1200));
        assert_eq!(first.line_price, Some(199.9));
        assert_eq!(first.location, "Bed 1");
        assert_eq!(first.chain, Some(800));
        assert_eq!(first.motor, "Somfy");

        let second = &items[1];
        assert_eq!(second.width, None);
        assert_eq!(second.line_price, None);
        assert_eq!(second.chain, None);
        assert_eq!(second.dual, "Y");
    }

    #[test]
    fn test_short_rows_default_missing_cells() {
        let headers = cells("#,Width,Height");
        let mut table = ItemTableBuilder::new(&headers);
        table.push_row(&cells("1,600"));

        let (items, lf) = table.finish();
        assert!(lf.is_empty());
        assert_eq!(items[0].width, Some(600));
        assert_eq!(items[0].height, None);
        assert_eq!(items[0].motor, "");
    }
}
