//! Minimal PresentationML writer.
//!
//! Produces a 4:3 deck with one blank layout. Every slide is made of plain
//! text boxes, so no placeholder inheritance is involved: a cover slide,
//! content slides with bullet levels, and a footer on each slide.

use std::io::{Cursor, Write};
use std::path::Path;

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use super::{Deck, FOOTER_COLOR, Paragraph, Theme, extract_subtitle, paragraphs};
use crate::error::AiError;

pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

const EMU_PER_INCH: i64 = 914_400;
const SLIDE_CX: i64 = 10 * EMU_PER_INCH;
const SLIDE_CY: i64 = 7 * EMU_PER_INCH + EMU_PER_INCH / 2;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

fn inches(v: f64) -> i64 {
    (v * EMU_PER_INCH as f64).round() as i64
}

/// Drops characters XML 1.0 cannot carry.
fn xml_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| c == '\t' || c == '\n' || c == '\r' || (c as u32) >= 0x20)
        .collect()
}

fn escape_text(text: &str) -> String {
    html_escape::encode_text(&xml_chars(text)).into_owned()
}

fn escape_attr(text: &str) -> String {
    html_escape::encode_double_quoted_attribute(&xml_chars(text)).into_owned()
}

/// One run of formatted text inside a text box.
struct Run<'a> {
    text: &'a str,
    size_pt: u32,
    bold: bool,
    color: &'a str,
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn attr(self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        }
    }
}

struct TextParagraph<'a> {
    level: u8,
    align: Align,
    bullet: bool,
    run: Run<'a>,
}

fn paragraph_xml(p: &TextParagraph<'_>) -> String {
    let indent = match p.level {
        0 => String::new(),
        level => {
            let mar = 342_900 * i64::from(level);
            format!(r#" marL="{mar}" indent="-228600""#)
        }
    };
    let bullet = if p.bullet {
        r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#
    } else {
        "<a:buNone/>"
    };
    format!(
        r#"<a:p><a:pPr lvl="{lvl}" algn="{algn}"{indent}>{bullet}</a:pPr><a:r><a:rPr lang="en-US" sz="{sz}" b="{b}" dirty="0"><a:solidFill><a:srgbClr val="{color}"/></a:solidFill></a:rPr><a:t>{text}</a:t></a:r></a:p>"#,
        lvl = p.level.saturating_sub(1),
        algn = p.align.attr(),
        sz = p.run.size_pt * 100,
        b = if p.run.bold { 1 } else { 0 },
        color = p.run.color,
        text = escape_text(p.run.text),
    )
}

fn text_box(id: u32, name: &str, x: i64, y: i64, cx: i64, cy: i64, paras: &[TextParagraph<'_>]) -> String {
    let body = if paras.is_empty() {
        r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#.to_string()
    } else {
        paras.iter().map(paragraph_xml).collect::<String>()
    };
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>{body}</p:txBody></p:sp>"#,
        name = escape_attr(name),
    )
}

fn slide_xml(shapes: &[String]) -> String {
    format!(
        r#"{XML_DECL}<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        shapes.concat()
    )
}

fn footer(deck_title: &str, number: usize, total: usize) -> String {
    let text = format!("{deck_title} | {number}/{total}");
    text_box(
        10,
        "Footer",
        inches(0.3),
        inches(6.8),
        inches(9.4),
        inches(0.3),
        &[TextParagraph {
            level: 0,
            align: Align::Right,
            bullet: false,
            run: Run {
                text: &text,
                size_pt: 12,
                bold: false,
                color: FOOTER_COLOR,
            },
        }],
    )
}

fn cover_slide(deck: &Deck, index: usize, theme: &Theme) -> String {
    let slide = &deck.slides[index];
    let subtitle = extract_subtitle(&slide.content);
    let title = text_box(
        2,
        "Title",
        inches(0.75),
        inches(2.2),
        inches(8.5),
        inches(1.5),
        &[TextParagraph {
            level: 0,
            align: Align::Center,
            bullet: false,
            run: Run {
                text: &slide.title,
                size_pt: 44,
                bold: true,
                color: theme.title,
            },
        }],
    );
    let sub = text_box(
        3,
        "Subtitle",
        inches(1.5),
        inches(3.9),
        inches(7.0),
        inches(1.2),
        &[TextParagraph {
            level: 0,
            align: Align::Center,
            bullet: false,
            run: Run {
                text: &subtitle,
                size_pt: 28,
                bold: false,
                color: theme.subtitle,
            },
        }],
    );
    slide_xml(&[title, sub, footer(&deck.title, index + 1, deck.slides.len())])
}

fn content_slide(deck: &Deck, index: usize, theme: &Theme) -> String {
    let slide = &deck.slides[index];
    let title = text_box(
        2,
        "Title",
        inches(0.5),
        inches(0.4),
        inches(9.0),
        inches(1.1),
        &[TextParagraph {
            level: 0,
            align: Align::Left,
            bullet: false,
            run: Run {
                text: &slide.title,
                size_pt: 36,
                bold: true,
                color: theme.title,
            },
        }],
    );

    let paras: Vec<Paragraph> = paragraphs(&slide.content);
    let body_paras: Vec<TextParagraph<'_>> = paras
        .iter()
        .map(|p| TextParagraph {
            level: p.level,
            align: Align::Left,
            bullet: p.level > 0,
            run: Run {
                text: &p.text,
                size_pt: match p.level {
                    0 => 24,
                    1 => 20,
                    _ => 18,
                },
                bold: p.level == 1,
                color: if p.level == 0 { theme.text } else { theme.bullet },
            },
        })
        .collect();

    let body = text_box(
        3,
        "Content",
        inches(0.5),
        inches(1.6),
        inches(9.0),
        inches(5.0),
        &body_paras,
    );
    slide_xml(&[title, body, footer(&deck.title, index + 1, deck.slides.len())])
}

fn content_types(slide_count: usize) -> String {
    let slides: String = (1..=slide_count)
        .map(|n| {
            format!(
                r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
            )
        })
        .collect();
    format!(
        r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/><Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/><Override PartName="/ppt/viewProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml"/><Override PartName="/ppt/tableStyles.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>{slides}</Types>"#
    )
}

fn root_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_REL}"><Relationship Id="rId1" Type="{REL_BASE}/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="{REL_BASE}/extended-properties" Target="docProps/app.xml"/></Relationships>"#
    )
}

fn core_props(title: &str) -> String {
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"{XML_DECL}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>lumino</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified></cp:coreProperties>"#,
        escape_text(title)
    )
}

fn app_props(slide_count: usize) -> String {
    format!(
        r#"{XML_DECL}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>lumino</Application><Slides>{slide_count}</Slides></Properties>"#
    )
}

fn presentation(slide_count: usize) -> String {
    let ids: String = (1..=slide_count)
        .map(|n| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n + 1))
        .collect();
    format!(
        r#"{XML_DECL}<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{ids}</p:sldIdLst><p:sldSz cx="{SLIDE_CX}" cy="{SLIDE_CY}" type="screen4x3"/><p:notesSz cx="{SLIDE_CY}" cy="{SLIDE_CX}"/></p:presentation>"#
    )
}

fn presentation_rels(slide_count: usize) -> String {
    let mut rels = format!(
        r#"<Relationship Id="rId1" Type="{REL_BASE}/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#
    );
    for n in 1..=slide_count {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{REL_BASE}/slide" Target="slides/slide{n}.xml"/>"#,
            n + 1
        ));
    }
    let next = slide_count + 2;
    rels.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="{REL_BASE}/theme" Target="theme/theme1.xml"/><Relationship Id="rId{}" Type="{REL_BASE}/presProps" Target="presProps.xml"/><Relationship Id="rId{}" Type="{REL_BASE}/viewProps" Target="viewProps.xml"/><Relationship Id="rId{}" Type="{REL_BASE}/tableStyles" Target="tableStyles.xml"/>"#,
        next,
        next + 1,
        next + 2,
        next + 3
    ));
    format!(r#"{XML_DECL}<Relationships xmlns="{NS_REL}">{rels}</Relationships>"#)
}

const EMPTY_TREE: &str = r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree>"#;

fn slide_master() -> String {
    format!(
        r#"{XML_DECL}<p:sldMaster xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>{EMPTY_TREE}</p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#
    )
}

fn slide_master_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_REL}"><Relationship Id="rId1" Type="{REL_BASE}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="{REL_BASE}/theme" Target="../theme/theme1.xml"/></Relationships>"#
    )
}

fn slide_layout() -> String {
    format!(
        r#"{XML_DECL}<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" type="blank" preserve="1"><p:cSld name="Blank">{EMPTY_TREE}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#
    )
}

fn slide_layout_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_REL}"><Relationship Id="rId1" Type="{REL_BASE}/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#
    )
}

fn slide_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_REL}"><Relationship Id="rId1" Type="{REL_BASE}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#
    )
}

fn theme_xml() -> String {
    let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = |w: u32| {
        format!(
            r#"<a:ln w="{w}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#
        )
    };
    format!(
        r#"{XML_DECL}<a:theme xmlns:a="{NS_A}" name="Lumino"><a:themeElements><a:clrScheme name="Lumino"><a:dk1><a:srgbClr val="000000"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Lumino"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Lumino"><a:fillStyleLst>{solid}{solid}{solid}</a:fillStyleLst><a:lnStyleLst>{l1}{l2}{l3}</a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst>{solid}{solid}{solid}</a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#,
        l1 = line(9525),
        l2 = line(25400),
        l3 = line(38100),
    )
}

fn pres_props() -> String {
    format!(r#"{XML_DECL}<p:presentationPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"/>"#)
}

fn view_props() -> String {
    format!(
        r#"{XML_DECL}<p:viewPr xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr><p:gridSpacing cx="76200" cy="76200"/></p:viewPr>"#
    )
}

fn table_styles() -> String {
    format!(
        r#"{XML_DECL}<a:tblStyleLst xmlns:a="{NS_A}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

/// Renders the deck as `.pptx` bytes. The first slide is the cover.
pub fn render_deck(deck: &Deck, theme: &Theme) -> Result<Vec<u8>, AiError> {
    let count = deck.slides.len();
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut parts: Vec<(String, String)> = vec![
        ("[Content_Types].xml".into(), content_types(count)),
        ("_rels/.rels".into(), root_rels()),
        ("docProps/core.xml".into(), core_props(&deck.title)),
        ("docProps/app.xml".into(), app_props(count)),
        ("ppt/presentation.xml".into(), presentation(count)),
        ("ppt/_rels/presentation.xml.rels".into(), presentation_rels(count)),
        ("ppt/slideMasters/slideMaster1.xml".into(), slide_master()),
        ("ppt/slideMasters/_rels/slideMaster1.xml.rels".into(), slide_master_rels()),
        ("ppt/slideLayouts/slideLayout1.xml".into(), slide_layout()),
        ("ppt/slideLayouts/_rels/slideLayout1.xml.rels".into(), slide_layout_rels()),
        ("ppt/theme/theme1.xml".into(), theme_xml()),
        ("ppt/presProps.xml".into(), pres_props()),
        ("ppt/viewProps.xml".into(), view_props()),
        ("ppt/tableStyles.xml".into(), table_styles()),
    ];

    for index in 0..count {
        let xml = if index == 0 {
            cover_slide(deck, index, theme)
        } else {
            content_slide(deck, index, theme)
        };
        parts.push((format!("ppt/slides/slide{}.xml", index + 1), xml));
        parts.push((
            format!("ppt/slides/_rels/slide{}.xml.rels", index + 1),
            slide_rels(),
        ));
    }

    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Renders the deck and writes it to `path`.
pub async fn write_deck(deck: &Deck, theme: &Theme, path: &Path) -> Result<(), AiError> {
    let bytes = render_deck(deck, theme)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
