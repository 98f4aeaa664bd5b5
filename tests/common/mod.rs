//! Fixture PDFs generated with lopdf.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A string drawn at `(x, y)` in 12pt Helvetica.
pub type Placed<'a> = (i64, i64, &'a str);

/// Build a PDF with one page per entry of `pages`.
pub fn build_pdf(pages: &[Vec<Placed<'_>>]) -> Vec<u8> {
    let contents = pages
        .iter()
        .map(|items| {
            let mut operations = Vec::new();
            for &(x, y, text) in items {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![Object::Integer(x), Object::Integer(y)],
                ));
                operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
                operations.push(Operation::new("ET", vec![]));
            }
            operations
        })
        .collect();
    build_pdf_from_operations(contents, false)
}

/// Build a PDF with one page per content stream. `F1` is Helvetica. With
/// `cid_font`, the resources also declare `F2`: a Type0 `Identity-H` font
/// with no `ToUnicode` map, whose encoding cannot be resolved.
pub fn build_pdf_from_operations(pages: Vec<Vec<Operation>>, cid_font: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let mut fonts = dictionary! {
        "F1" => font_id,
    };
    if cid_font {
        let descendant_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => "NotoSansCJK-Regular",
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => Object::Integer(0),
            },
        });
        let type0_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "NotoSansCJK-Regular",
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(descendant_id)],
        });
        fonts.set("F2", type0_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

/// Three pages, one line of text each.
pub fn three_page_pdf() -> Vec<u8> {
    build_pdf(&[
        vec![(72, 720, "Alpha page")],
        vec![(72, 720, "Bravo page")],
        vec![(72, 720, "Charlie page")],
    ])
}

/// One page with a title line and a 3x2 table below it.
pub fn table_pdf() -> Vec<u8> {
    build_pdf(&[vec![
        (200, 750, "Statement"),
        (72, 700, "Name"),
        (300, 700, "Amount"),
        (72, 680, "Rent"),
        (300, 680, "1200"),
        (72, 660, "Food"),
        (300, 660, "350"),
    ]])
}

/// One page whose resources carry an unused Identity-H font, with a
/// three-line text block drawn in Helvetica using `Tj`, `'` and `"`.
pub fn mixed_font_pdf() -> Vec<u8> {
    let name = |n: &[u8]| Object::Name(n.to_vec());
    build_pdf_from_operations(
        vec![vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![name(b"F1"), Object::Integer(12)]),
            Operation::new("TL", vec![Object::Integer(14)]),
            Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
            Operation::new("Tj", vec![Object::string_literal("Hello invoice")]),
            Operation::new("'", vec![Object::string_literal("Second line")]),
            Operation::new(
                "\"",
                vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::string_literal("Third line"),
                ],
            ),
            Operation::new("ET", vec![]),
        ]],
        true,
    )
}

/// A document with no pages at all.
pub fn empty_pdf() -> Vec<u8> {
    build_pdf(&[])
}

/// Write bytes to `name` inside `dir` and return the path.
pub fn write_fixture(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("write fixture");
    path
}
