use std::io::{Cursor, Read};

use chrono::NaiveDateTime;
use geniki_core::OrderId;
use geniki_report::{EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME, emit};
use geniki_vouchers::{VoucherNumber, VoucherRecord};

fn record(order: u64, voucher: &str, date: &str, amount: &str) -> VoucherRecord {
    VoucherRecord {
        order_id: OrderId::new(order),
        voucher_number: VoucherNumber::parse(voucher).unwrap(),
        voucher_date: NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").unwrap(),
        order_amount: amount.parse().unwrap(),
    }
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

#[test]
fn export_file_metadata() {
    let file = emit(&[record(1, "1234567890", "2024-05-01 10:00:00", "25.50")]).unwrap();
    assert_eq!(file.file_name, EXPORT_FILE_NAME);
    assert_eq!(file.file_name, "voucher_export.xlsx");
    assert_eq!(file.content_type, EXPORT_CONTENT_TYPE);
    assert_eq!(&file.bytes[..2], b"PK");
}

#[test]
fn package_contains_all_required_parts() {
    let file = emit(&[record(1, "1234567890", "2024-05-01 10:00:00", "25.50")]).unwrap();
    let archive = zip::ZipArchive::new(Cursor::new(file.bytes.as_slice())).unwrap();
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );
}

#[test]
fn sheet_has_bold_header_and_formatted_rows() {
    let file = emit(&[
        record(17, "0012345678", "2024-05-01 23:59:59", "25.50"),
        record(18, "9876543210", "2024-05-02 00:00:01", "100"),
    ])
    .unwrap();

    let sheet = read_part(&file.bytes, "xl/worksheets/sheet1.xml");

    for (col, title) in ["A", "B", "C", "D"].iter().zip(["Order ID", "Voucher Number", "Voucher Date", "Order Amount"]) {
        let cell = format!(
            r#"<c r="{col}1" s="1" t="inlineStr"><is><t xml:space="preserve">{title}</t></is></c>"#
        );
        assert!(sheet.contains(&cell), "missing header cell {cell}");
    }

    assert!(sheet.contains(r#"<c r="A2"><v>17</v></c>"#));
    assert!(sheet.contains(r#"<c r="B2" t="inlineStr"><is><t xml:space="preserve">0012345678</t></is></c>"#));
    assert!(sheet.contains(r#"<c r="C2" t="inlineStr"><is><t xml:space="preserve">2024-05-01</t></is></c>"#));
    assert!(sheet.contains(r#"<c r="D2"><v>25.5</v></c>"#));
    assert!(sheet.contains(r#"<c r="C3" t="inlineStr"><is><t xml:space="preserve">2024-05-02</t></is></c>"#));
    assert!(sheet.contains(r#"<c r="D3"><v>100</v></c>"#));
    assert!(!sheet.contains(r#"<row r="4">"#));

    let styles = read_part(&file.bytes, "xl/styles.xml");
    assert!(styles.contains("<b/>"));
}
