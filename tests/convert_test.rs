//! End-to-end conversion tests over temporary chapter directories.

use std::fs;
use std::path::Path;

use epub2zefania::{
    BibleInfo, ConvertOptions, Error, WriteOptions, build_bible, convert_directory,
};
use tempfile::TempDir;

fn write_chapter(dir: &Path, name: &str, body: &str) {
    let html = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><title>{name}</title></head>
<body>
{body}
</body>
</html>"#
    );
    fs::write(dir.join(name), html).expect("Failed to write chapter");
}

fn compact() -> ConvertOptions {
    ConvertOptions::default().with_write_options(WriteOptions::compact())
}

fn convert_to_string(dir: &Path, options: &ConvertOptions) -> String {
    let output = dir.join("bible_output.xml");
    convert_directory(dir, &output, options).expect("Conversion failed");
    fs::read_to_string(output).expect("Failed to read output")
}

#[test]
fn test_minimal_genesis() {
    let dir = TempDir::new().unwrap();
    write_chapter(
        dir.path(),
        "gen01.html",
        r#"<h3>Genesis</h3><p class="bi"><span class="di">v1</span>In the beginning...</p>"#,
    );

    let xml = convert_to_string(dir.path(), &compact());
    assert!(xml.contains(
        r#"<BIBLEBOOK bnumber="1" bname="Genesis" bsname="Gen"><CHAPTER cnumber="1"><VERS vnumber="1">In the beginning...</VERS></CHAPTER></BIBLEBOOK>"#
    ));
}

#[test]
fn test_same_title_becomes_chapters() {
    let dir = TempDir::new().unwrap();
    write_chapter(
        dir.path(),
        "ruth01.html",
        r#"<h3>Ruth</h3><p class="bi"><span class="di">v1</span>one</p>"#,
    );
    write_chapter(
        dir.path(),
        "ruth02.html",
        r#"<h3>Ruth</h3><p class="bi"><span class="di">v1</span>two</p>"#,
    );

    let bible = build_bible(dir.path(), &ConvertOptions::default()).unwrap();
    assert_eq!(bible.books.len(), 1);
    let numbers: Vec<_> = bible.books[0].chapters.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![1, 2]);

    let xml = convert_to_string(dir.path(), &compact());
    assert_eq!(xml.matches("<BIBLEBOOK").count(), 1);
    assert!(xml.contains(r#"<CHAPTER cnumber="1"><VERS vnumber="1">one</VERS></CHAPTER>"#));
    assert!(xml.contains(r#"<CHAPTER cnumber="2"><VERS vnumber="1">two</VERS></CHAPTER>"#));
}

#[test]
fn test_untitled_files_skipped() {
    let dir = TempDir::new().unwrap();
    write_chapter(dir.path(), "00cover.html", r#"<p class="bi"><span class="di">v9</span>cover</p>"#);
    write_chapter(
        dir.path(),
        "01.html",
        r#"<h3>Jonah</h3><p class="bi"><span class="di">v1</span>Now the word</p>"#,
    );
    write_chapter(dir.path(), "99toc.html", "<h1>Contents</h1>");

    let output = dir.path().join("out.xml");
    let summary = convert_directory(dir.path(), &output, &compact()).unwrap();
    assert_eq!(summary.files, 3);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.books, 1);
    assert_eq!(summary.chapters, 1);
    assert_eq!(summary.verses, 1);

    let xml = fs::read_to_string(output).unwrap();
    assert!(!xml.contains("cover"));
    assert!(xml.contains(r#"<CHAPTER cnumber="1"><VERS vnumber="1">Now the word</VERS>"#));
}

#[test]
fn test_blank_title_file_skipped() {
    let dir = TempDir::new().unwrap();
    write_chapter(dir.path(), "00.html", "<h3>  </h3><p>front matter</p>");
    write_chapter(
        dir.path(),
        "01.html",
        r#"<h3>Genesis</h3><p class="bi"><span class="di">v1</span>In the beginning</p>"#,
    );

    let bible = build_bible(dir.path(), &ConvertOptions::default()).unwrap();
    let books: Vec<_> = bible.books.iter().map(|b| (b.number, b.title.as_str())).collect();
    assert_eq!(books, vec![(1, "Genesis")]);

    let output = dir.path().join("out.xml");
    let summary = convert_directory(dir.path(), &output, &compact()).unwrap();
    assert_eq!(summary.files, 2);
    assert_eq!(summary.skipped, 1);
    assert!(!fs::read_to_string(output).unwrap().contains(r#"bname="""#));
}

#[test]
fn test_file_name_order_drives_numbering() {
    let dir = TempDir::new().unwrap();
    // Written out of order on purpose.
    write_chapter(
        dir.path(),
        "b_exodus.html",
        r#"<h3>Exodus</h3><p class="bi"><span class="di">v1</span>names</p>"#,
    );
    write_chapter(
        dir.path(),
        "a_genesis_2.html",
        r#"<h3>Genesis</h3><p class="bi"><span class="di">v1</span>second</p>"#,
    );
    write_chapter(
        dir.path(),
        "a_genesis_1.html",
        r#"<h3>Genesis</h3><p class="bi"><span class="di">v1</span>first</p>"#,
    );

    let bible = build_bible(dir.path(), &ConvertOptions::default()).unwrap();
    let books: Vec<_> = bible.books.iter().map(|b| (b.number, b.title.as_str())).collect();
    assert_eq!(books, vec![(1, "Genesis"), (2, "Exodus")]);
    assert_eq!(bible.books[0].chapters[0].verses[0].text, "first");
    assert_eq!(bible.books[0].chapters[1].verses[0].text, "second");
}

#[test]
fn test_other_extensions_ignored() {
    let dir = TempDir::new().unwrap();
    write_chapter(
        dir.path(),
        "01.xhtml",
        r#"<h3>Amos</h3><p class="bi"><span class="di">v1</span>words</p>"#,
    );
    fs::write(dir.path().join("style.css"), "p.bi { margin: 0 }").unwrap();

    let bible = build_bible(dir.path(), &ConvertOptions::default()).unwrap();
    assert!(bible.books.is_empty());

    let bible = build_bible(dir.path(), &ConvertOptions::new().with_extension("xhtml")).unwrap();
    assert_eq!(bible.books.len(), 1);
}

#[test]
fn test_psalm_stanzas() {
    let dir = TempDir::new().unwrap();
    write_chapter(
        dir.path(),
        "ps023.html",
        r#"<h3>Psalms</h3>
<p class="sl">23 <span class="di">v1</span>The LORD is my shepherd;<br/>I shall not want.</p>
<p class="sl"><span class="di">v2</span>He makes me lie down in green pastures.</p>"#,
    );

    let bible = build_bible(dir.path(), &ConvertOptions::default()).unwrap();
    let verses = &bible.books[0].chapters[0].verses;
    assert_eq!(verses.len(), 2);
    assert_eq!(verses[0].text, "The LORD is my shepherd;\n  I shall not want.");
    assert_eq!(verses[1].text, "He makes me lie down in green pastures.");
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();
    let xml = convert_to_string(dir.path(), &compact());
    assert!(xml.contains("</INFORMATION></XMLBIBLE>"));
    assert!(!xml.contains("BIBLEBOOK"));
}

#[test]
fn test_custom_metadata() {
    let dir = TempDir::new().unwrap();
    write_chapter(
        dir.path(),
        "01.html",
        r#"<h3>Génesis</h3><p class="bi"><span class="di">v1</span>En el principio</p>"#,
    );

    let options = compact().with_info(
        BibleInfo::new()
            .with_bible_name("Reina-Valera 1909")
            .with_publisher("Dominio público")
            .with_date("1909")
            .with_language("SPA"),
    );
    let xml = convert_to_string(dir.path(), &options);
    assert!(xml.contains(r#"biblename="Reina-Valera 1909""#));
    assert!(xml.contains("<publisher>Dominio público</publisher>"));
    assert!(xml.contains("<date>1909</date>"));
    assert!(xml.contains(r#"bname="Génesis" bsname="Gén""#));
}

#[test]
fn test_missing_input_dir() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("OPS");
    let err = convert_directory(&missing, &dir.path().join("out.xml"), &compact()).unwrap_err();
    assert!(matches!(err, Error::NotADirectory(_)));
    assert!(!dir.path().join("out.xml").exists());
}

#[test]
fn test_unwritable_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("no_such_dir").join("out.xml");
    let err = convert_directory(dir.path(), &output, &compact()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_pretty_output_is_indented() {
    let dir = TempDir::new().unwrap();
    write_chapter(
        dir.path(),
        "01.html",
        r#"<h3>Jude</h3><p class="bi"><span class="di">v1</span>Jude, a servant</p>"#,
    );

    let xml = convert_to_string(dir.path(), &ConvertOptions::default());
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<XMLBIBLE"));
    assert!(xml.contains("\n  <BIBLEBOOK bnumber=\"1\" bname=\"Jude\" bsname=\"Jud\">\n"));
    assert!(xml.contains("\n      <VERS vnumber=\"1\">Jude, a servant</VERS>\n"));
}
