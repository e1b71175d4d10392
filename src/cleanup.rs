//! Article preparation.
//!
//! fx: Prepare the article node for display. Clean out any inline styles,
//! iframes, forms, strip extraneous <p> tags, etc.
//!
//! The conditional passes run backward through the tree: a parent's
//! "fishiness" depends on what its children look like, so children must be
//! cleaned before the parent is judged.

use crate::annotations::Annotations;
use crate::dom::{self, NodeRef};
use crate::extract::Session;
use crate::grabber::class_weight;
use crate::patterns::{matches_opt, B64_DATA_URL, IMG_EXT, SHARE, SRCSET_VALUE, SRC_VALUE, VIDEOS};
use crate::text;
use crate::walk;

/// Share widgets below this many characters of text are dropped.
const SHARE_ELEMENT_THRESHOLD: usize = 500;

const PRESENTATIONAL_ATTRS: &[&str] = &[
    "align", "background", "bgcolor", "border", "cellpadding", "cellspacing",
    "frame", "hspace", "rules", "style", "valign", "vspace",
];

const DEPRECATED_SIZE_ELEMS: &[&str] = &["table", "th", "td", "hr", "pre"];

/// fx: Remove the style attribute on every e and under.
fn clean_styles(article: &NodeRef) {
    let stop = walk::skip_descendants(article);
    let mut curr = Some(article.clone());
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        if !node.is_element() || dom::has_tag(&node, &["svg"]) {
            curr = walk::skip_descendants(&node);
            continue;
        }

        for name in PRESENTATIONAL_ATTRS {
            dom::remove_attr(&node, name);
        }
        if dom::has_tag(&node, DEPRECATED_SIZE_ELEMS) {
            dom::remove_attr(&node, "width");
            dom::remove_attr(&node, "height");
        }
        curr = walk::following(&node);
    }
}

// === Data tables ===

/// Extract a reasonable positive number from the attribute; if unable,
/// treat it as absent.
fn attr_num(node: &NodeRef, name: &str) -> u32 {
    dom::attr(node, name)
        .and_then(|v| {
            let digits: String = v
                .trim_start_matches(text::is_space)
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        })
        .unwrap_or(0)
}

/// Row and column counts, with spans taken into account.
fn table_size(table: &NodeRef) -> (u32, u32) {
    let mut rows = 0u32;
    let mut columns = 0u32;

    let stop = walk::skip_descendants(table);
    let mut curr = walk::following(table);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        if !dom::has_tag(&node, &["tr"]) {
            curr = walk::following(&node);
            continue;
        }
        let rowspan = attr_num(&node, "rowspan");
        rows += rowspan.max(1);

        // fx: Now look for column-related info. The colspan is read off the
        // row, faithful to the reference heuristic.
        let mut cols_in_row = 0u32;
        let mut child = node.first_child();
        while let Some(c) = child {
            if dom::has_tag(&c, &["td"]) {
                let colspan = attr_num(&node, "colspan");
                cols_in_row += colspan.max(1);
            }
            child = c.next_sibling();
        }
        columns = columns.max(cols_in_row);

        curr = walk::skip_descendants(&node);
    }
    (rows, columns)
}

/// If the node is a data (non-layout) table, mark it as such.
fn mark_if_data_table(node: &NodeRef, ann: &mut Annotations) {
    if !dom::has_tag(node, &["table"]) {
        return;
    }
    if dom::attr_eq(node, "role", "presentation") || dom::attr_eq(node, "datatable", "0") {
        return;
    }

    if dom::has_attr(node, "summary") {
        ann.mark_data_table(node.id);
        return;
    }
    let has_caption = walk::has_such_descendant(node, |n| {
        dom::has_tag(n, &["caption"]) && n.first_child().is_some()
    });
    let has_data_tags = walk::has_such_descendant(node, |n| {
        dom::has_tag(n, &["col", "colgroup", "tfoot", "thead", "th"])
    });
    if has_caption || has_data_tags {
        ann.mark_data_table(node.id);
        return;
    }

    // fx: Nested tables indicate a layout table
    if walk::has_such_descendant(node, |n| dom::has_tag(n, &["table"])) {
        return;
    }

    let (rows, columns) = table_size(node);
    if rows >= 10 || columns > 4 || rows * columns > 10 {
        ann.mark_data_table(node.id);
    }
}

// === Lazy images ===

/// Could this image's base64-encoded src be meaningless?
fn image_src_is_meaningless(img: &NodeRef) -> bool {
    let Some(src) = dom::attr(img, "src") else {
        return false;
    };
    if !B64_DATA_URL.is_match(&src) {
        return false;
    }
    // fx: SVG can have a meaningful image in under 133 bytes.
    if src.to_ascii_lowercase().contains("image/svg+xml") {
        return false;
    }

    // fx: Make sure this element has other attributes which contains image.
    // If it doesn't, then this src is important and shouldn't be removed.
    let has_other_image = dom::attrs(img)
        .iter()
        .any(|(name, value)| name != "src" && IMG_EXT.is_match(value));
    if !has_other_image {
        return false;
    }

    // fx: Here we assume if image is less than 100 bytes (or 133B after
    // encoded to base64) it will be too small, therefore it might be
    // placeholder image.
    if let Some(pos) = src.to_ascii_lowercase().find("base64") {
        return src.len() - pos < 7 + 133;
    }
    false
}

/// Will this image node be loaded by javascript?
fn is_image_lazy(img: &NodeRef) -> bool {
    // fx: In some sites (e.g. Kotaku), they put 1px square image as base64
    // data uri in the src attribute. So, here we check if the data uri is
    // too short, just might as well remove it.
    if image_src_is_meaningless(img) {
        dom::remove_attr(img, "src");
    }

    if !dom::has_attr(img, "src") && !dom::has_attr(img, "srcset") {
        return true;
    }
    dom::attr(img, "class").is_some_and(|c| c.to_ascii_lowercase().contains("lazy"))
}

/// Convert a lazy image node into one that can be loaded without javascript.
fn fix_lazy_image(doc_node: &NodeRef) {
    for (name, value) in dom::attrs(doc_node) {
        if name == "src" || name == "srcset" {
            continue;
        }
        let dest = if SRCSET_VALUE.is_match(&value) {
            "srcset"
        } else if SRC_VALUE.is_match(&value) {
            "src"
        } else {
            continue;
        };

        if dom::has_tag(doc_node, &["img", "picture"]) {
            // fx: if this is an img or picture, set the attribute directly
            dom::set_attr(doc_node, dest, &value);
        } else if !walk::has_such_descendant(doc_node, |n| dom::has_tag(n, &["img", "picture"])) {
            // fx: if the item is a <figure> that does not contain an image
            // or picture, create one and place it inside the figure
            let img = dom::new_element_beside(doc_node, "img");
            dom::append_child(doc_node, &img);
            dom::set_attr(&img, dest, &value);
        }
    }
}

// === Fishiness ===

/// Is this node a data table, or inside of one?
fn inside_data_table(node: &NodeRef, ann: &Annotations) -> bool {
    dom::ancestor_with_tag(node, "table").is_some_and(|t| ann.is_data_table(t.id))
}

fn is_embed(node: &NodeRef) -> bool {
    dom::has_tag(node, &["object", "embed", "iframe"])
}

/// Is this node an embed with a video? People love movies.
fn is_embed_with_video(node: &NodeRef) -> bool {
    if !is_embed(node) {
        return false;
    }
    // fx: If this embed has attribute that matches video regex...
    if dom::attrs(node).iter().any(|(_, value)| VIDEOS.is_match(value)) {
        return true;
    }
    // fx: For embed with <object> tag, check inner HTML as well
    dom::has_tag(node, &["object"]) && VIDEOS.is_match(&dom::outer_html(node))
}

/// Count the embeds inside a node; None means a video embed was found and
/// the node must not be removed.
fn embeds_for_removal(node: &NodeRef) -> Option<usize> {
    let mut count = 0;
    let stop = walk::skip_descendants(node);
    let mut curr = walk::following(node);
    while let Some(n) = curr {
        if stop.as_ref().is_some_and(|s| s.id == n.id) {
            break;
        }
        if is_embed_with_video(&n) {
            return None;
        }
        if is_embed(&n) {
            count += 1;
        }
        curr = walk::following(&n);
    }
    Some(count)
}

fn tag_count(node: &NodeRef, tag: &str) -> usize {
    walk::count_such_descendants(node, |n| dom::has_tag(n, &[tag]))
}

/// Check if the node looks "fishy", for the sake of the conditional passes.
fn looks_fishy(node: &NodeRef, ann: &Annotations, session: &Session) -> bool {
    if inside_data_table(node, ann) {
        return false;
    }

    let weight = class_weight(node, session.weight_classes);
    if weight < 0 {
        return true;
    }

    if text::char_count(&dom::text(node), ',') >= 10 {
        return false;
    }

    // fx: If there are not very many commas, and the number of
    // non-paragraph elements is more than paragraphs or other ominous
    // signs, remove the element.
    let p_count = tag_count(node, "p");
    let img_count = tag_count(node, "img");
    let li_count = tag_count(node, "li") as isize - 100;
    let input_count = tag_count(node, "input");

    let Some(embed_count) = embeds_for_removal(node) else {
        return false;
    };
    let link_density = text::link_density(node);
    let content_length = text::normalized_text_len(node);
    let is_list = dom::has_tag(node, &["ul", "ol"]);

    if dom::ancestor_with_tag(node, "figure").is_none() {
        if img_count > 1 && (p_count as f64) < img_count as f64 / 2.0 {
            return true;
        }
        if !is_list && content_length < 25 && (img_count == 0 || img_count > 2) {
            return true;
        }
    }
    if !is_list && li_count > p_count as isize {
        return true;
    }
    if input_count > p_count / 3 {
        return true;
    }
    if !is_list && weight < 25 && link_density > 0.2 {
        return true;
    }
    if weight >= 25 && link_density > 0.5 {
        return true;
    }
    if (embed_count == 1 && content_length < 75) || embed_count > 1 {
        return true;
    }
    false
}

/// fx: Clean an element of all tags of type "tag" if they look fishy.
/// "Fishy" is an algorithm based on content length, classnames, link
/// density, number of images & embeds, etc.
fn clean_conditionally(article: &NodeRef, tag: &str, ann: &Annotations, session: &Session) {
    if !session.clean_conditionally {
        return;
    }
    walk::bw_remove_descendants_if(article, |n| {
        dom::has_tag(n, &[tag]) && looks_fishy(n, ann, session)
    });
}

/// fx: Clean a node of all elements of type "tag". (Unless it's a
/// youtube/vimeo video.)
fn clean_all(article: &NodeRef, tag: &str) {
    walk::bw_remove_descendants_if(article, |n| {
        dom::has_tag(n, &[tag]) && !is_embed_with_video(n)
    });
}

// === Odds and ends ===

/// Is this an element with little content that has "share" in id/class?
fn is_small_share_node(node: &NodeRef) -> bool {
    let is_share = matches_opt(&SHARE, dom::attr(node, "class").as_deref())
        || matches_opt(&SHARE, dom::attr(node, "id").as_deref());
    is_share && text::text_len(node) < SHARE_ELEMENT_THRESHOLD
}

/// If the article has a single `<h2>`, return it.
fn single_h2<'a>(article: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut h2: Option<NodeRef<'a>> = None;
    let stop = walk::skip_descendants(article);
    let mut curr = walk::following(article);
    while let Some(node) = curr {
        if stop.as_ref().is_some_and(|s| s.id == node.id) {
            break;
        }
        if dom::has_tag(&node, &["h2"]) {
            if h2.is_some() {
                return None;
            }
            h2 = Some(node.clone());
        }
        curr = walk::following(&node);
    }
    h2
}

/// fx: If there is only one h2 and its text content substantially equals
/// article title, they are probably using it as a header and not a
/// subheader, so remove it since we already extract the title separately.
fn remove_duplicate_title(article: &NodeRef, session: &Session) {
    let Some(title) = session.metadata.title.as_ref().filter(|t| !t.is_empty()) else {
        return;
    };
    let Some(h2) = single_h2(article) else {
        return;
    };
    let h2_text = dom::text(&h2).to_string();

    let title_len = title.len() as f64;
    let diff = (h2_text.len() as f64 - title_len) / title_len;

    let is_match = if diff.abs() < 0.5 {
        if diff > 0.0 {
            h2_text.contains(title.as_str())
        } else {
            title.contains(&h2_text)
        }
    } else {
        false
    };

    if is_match {
        dom::remove(&h2);
    }
}

/// Is this node a spurious header?
fn is_spurious_header(node: &NodeRef, session: &Session) -> bool {
    dom::has_tag(node, &["h1", "h2"]) && class_weight(node, session.weight_classes) < 0
}

/// Is this a paragraph with no valuable content?
fn is_extra_paragraph(node: &NodeRef) -> bool {
    if !dom::has_tag(node, &["p"]) {
        return false;
    }
    if walk::has_such_descendant(node, |n| dom::has_tag(n, &["img", "embed"])) {
        return false;
    }
    // fx: At this point, nasty iframes have been removed, only remain
    // embedded video ones.
    if walk::has_such_descendant(node, |n| dom::has_tag(n, &["object", "iframe"])) {
        return false;
    }
    text::text_len(node) == 0
}

/// Is this node a line break whose next element is a paragraph?
fn is_break_before_paragraph(node: &NodeRef) -> bool {
    dom::has_tag(node, &["br"])
        && walk::next_element(node).is_some_and(|next| dom::has_tag(&next, &["p"]))
}

/// If the given node is a single-cell table, replace it with its content;
/// either way, return the node now in this place.
fn unwrap_if_single_cell_table<'a>(node: NodeRef<'a>) -> NodeRef<'a> {
    if !dom::has_tag(&node, &["table"]) {
        return node;
    }

    let tbody = text::single_tag_inside(&node, "tbody").unwrap_or(node.clone());
    let Some(row) = text::single_tag_inside(&tbody, "tr") else {
        return node;
    };
    let Some(cell) = text::single_tag_inside(&row, "td") else {
        return node;
    };

    if walk::forall_descendants(&cell, text::is_phrasing_content) {
        dom::rename(&cell, "p");
    } else {
        dom::rename(&cell, "div");
    }
    dom::replace_node(&node, &cell);
    cell
}

/// Run the full cleanup sequence on a candidate article.
pub(crate) fn prep_article(article: &NodeRef, ann: &mut Annotations, session: &Session) {
    clean_styles(article);

    // fx: Check for data tables before we continue, to avoid removing
    // items in those tables, which will often be isolated even though
    // they're visually linked to other content-ful elements.
    walk::change_descendants(article, |node| {
        mark_if_data_table(&node, ann);
        node
    });

    walk::change_descendants(article, |node| {
        if dom::has_tag(&node, &["img", "picture", "figure"]) && is_image_lazy(&node) {
            fix_lazy_image(&node);
        }
        node
    });

    // fx: Clean out junk from the article content
    clean_conditionally(article, "form", ann, session);
    clean_conditionally(article, "fieldset", ann, session);
    clean_all(article, "object");
    clean_all(article, "embed");
    clean_all(article, "h1");
    clean_all(article, "footer");
    clean_all(article, "link");
    clean_all(article, "aside");
    walk::remove_descendants_if(article, is_small_share_node);
    remove_duplicate_title(article, session);
    clean_all(article, "iframe");
    clean_all(article, "input");
    clean_all(article, "textarea");
    clean_all(article, "select");
    clean_all(article, "button");
    walk::remove_descendants_if(article, |n| is_spurious_header(n, session));

    // fx: Do these last as the previous stuff may have removed junk that
    // will affect these.
    clean_conditionally(article, "table", ann, session);
    clean_conditionally(article, "ul", ann, session);
    clean_conditionally(article, "div", ann, session);

    // fx: Remove extra paragraphs
    walk::remove_descendants_if(article, is_extra_paragraph);

    walk::remove_descendants_if(article, is_break_before_paragraph);
    walk::change_descendants(article, unwrap_if_single_cell_table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::options::Options;

    fn node<'a>(doc: &'a Document, sel: &str) -> NodeRef<'a> {
        doc.select(sel).nodes().first().cloned().unwrap()
    }

    fn session() -> Session {
        Session::new(&Options::default())
    }

    #[test]
    fn styles_are_stripped() {
        let doc = Document::from(
            r##"<div style="color:red" align="center"><table width="100%"><tr>
               <td bgcolor="#fff">x</td></tr></table></div>"##,
        );
        let div = node(&doc, "div");
        clean_styles(&div);

        assert!(!doc.select("[style]").exists());
        assert!(!doc.select("[align]").exists());
        assert!(!doc.select("[width]").exists());
        assert!(!doc.select("[bgcolor]").exists());
    }

    #[test]
    fn svg_subtrees_keep_styles() {
        let doc = Document::from(r#"<div><svg style="fill:red"><rect style="x"/></svg></div>"#);
        let div = node(&doc, "div");
        clean_styles(&div);

        assert!(doc.select("svg[style]").exists());
    }

    #[test]
    fn data_table_by_th() {
        let doc = Document::from(
            "<div><table><tr><th>h</th></tr><tr><td>d</td></tr></table></div>",
        );
        let div = node(&doc, "div");
        let table = node(&doc, "table");
        let mut ann = Annotations::new();

        walk::change_descendants(&div, |n| {
            mark_if_data_table(&n, &mut ann);
            n
        });
        assert!(ann.is_data_table(table.id));
    }

    #[test]
    fn presentation_table_is_not_data() {
        let doc = Document::from(
            r#"<div><table role="presentation"><tr><th>h</th></tr></table></div>"#,
        );
        let div = node(&doc, "div");
        let table = node(&doc, "table");
        let mut ann = Annotations::new();

        walk::change_descendants(&div, |n| {
            mark_if_data_table(&n, &mut ann);
            n
        });
        assert!(!ann.is_data_table(table.id));
    }

    #[test]
    fn big_table_is_data() {
        let mut rows = String::new();
        for _ in 0..12 {
            rows.push_str("<tr><td>x</td></tr>");
        }
        let doc = Document::from(format!("<div><table>{rows}</table></div>"));
        let div = node(&doc, "div");
        let table = node(&doc, "table");
        let mut ann = Annotations::new();

        walk::change_descendants(&div, |n| {
            mark_if_data_table(&n, &mut ann);
            n
        });
        assert!(ann.is_data_table(table.id));
    }

    #[test]
    fn nested_table_is_layout() {
        let doc = Document::from(
            "<div><table><tr><td><table><tr><td>x</td></tr></table></td></tr></table></div>",
        );
        let div = node(&doc, "div");
        let outer = node(&doc, "table");
        let mut ann = Annotations::new();

        walk::change_descendants(&div, |n| {
            mark_if_data_table(&n, &mut ann);
            n
        });
        assert!(!ann.is_data_table(outer.id));
    }

    #[test]
    fn lazy_image_gets_real_source() {
        let doc = Document::from(r#"<img class="lazy" src="spacer.gif" data-src="real.jpg">"#);
        let img = node(&doc, "img");

        assert!(is_image_lazy(&img));
        fix_lazy_image(&img);
        assert_eq!(dom::attr(&img, "src").as_deref(), Some("real.jpg"));
    }

    #[test]
    fn sourceless_image_is_lazy() {
        let doc = Document::from(r#"<img data-lazy-src="photo.png">"#);
        let img = node(&doc, "img");

        assert!(is_image_lazy(&img));
        fix_lazy_image(&img);
        assert_eq!(dom::attr(&img, "src").as_deref(), Some("photo.png"));
    }

    #[test]
    fn srcset_style_attribute_becomes_srcset() {
        let doc = Document::from(r#"<img data-srcset="a.jpg 1x, b.jpg 2x">"#);
        let img = node(&doc, "img");

        fix_lazy_image(&img);
        assert_eq!(
            dom::attr(&img, "srcset").as_deref(),
            Some("a.jpg 1x, b.jpg 2x")
        );
    }

    #[test]
    fn tiny_base64_src_is_dropped() {
        let doc = Document::from(
            r#"<img src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" data-src="real.jpg">"#,
        );
        let img = node(&doc, "img");

        assert!(is_image_lazy(&img));
        assert!(!dom::has_attr(&img, "src"));
    }

    #[test]
    fn video_embeds_survive_clean_all() {
        let doc = Document::from(
            r#"<div><iframe src="https://www.youtube.com/embed/x"> </iframe>
               <iframe src="https://ads.test/frame"> </iframe></div>"#,
        );
        let div = node(&doc, "div");
        clean_all(&div, "iframe");

        let frames = doc.select("iframe");
        assert_eq!(frames.length(), 1);
        assert!(frames.attr("src").unwrap().contains("youtube"));
    }

    #[test]
    fn link_heavy_div_is_fishy() {
        let doc = Document::from(
            r#"<div><a href="/1">one link</a> <a href="/2">two link</a> tiny</div>"#,
        );
        let div = node(&doc, "div");
        let ann = Annotations::new();

        assert!(looks_fishy(&div, &ann, &session()));
    }

    #[test]
    fn comma_rich_text_is_not_fishy() {
        let doc = Document::from(
            "<div>a, b, c, d, e, f, g, h, i, j, k and some more words here</div>",
        );
        let div = node(&doc, "div");
        let ann = Annotations::new();

        assert!(!looks_fishy(&div, &ann, &session()));
    }

    #[test]
    fn negative_class_weight_is_fishy() {
        let doc = Document::from(
            r#"<div class="footer">plenty of text in here, with a comma or two, even.</div>"#,
        );
        let div = node(&doc, "div");
        let ann = Annotations::new();

        assert!(looks_fishy(&div, &ann, &session()));
        // but not when class weighting is off
        let mut relaxed = session();
        relaxed.weight_classes = false;
        assert!(!looks_fishy(&div, &ann, &relaxed));
    }

    #[test]
    fn share_widgets_are_removed() {
        let doc = Document::from(
            r#"<div><div class="share">tweet this</div><p>content</p></div>"#,
        );
        let div = node(&doc, "div");
        walk::remove_descendants_if(&div, is_small_share_node);

        assert!(!doc.select(".share").exists());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn duplicate_title_h2_is_removed() {
        let doc = Document::from("<div><h2>My Article Title</h2><p>body text</p></div>");
        let div = node(&doc, "div");
        let mut session = session();
        session.metadata.title = Some("My Article Title".to_string());

        remove_duplicate_title(&div, &session);
        assert!(!doc.select("h2").exists());
    }

    #[test]
    fn unrelated_h2_survives() {
        let doc = Document::from("<div><h2>Completely Different Heading Here</h2></div>");
        let div = node(&doc, "div");
        let mut session = session();
        session.metadata.title = Some("Short".to_string());

        remove_duplicate_title(&div, &session);
        assert!(doc.select("h2").exists());
    }

    #[test]
    fn empty_paragraphs_are_removed() {
        let doc = Document::from(
            r#"<div><p></p><p>   </p><p><img src="x.jpg"></p><p>text</p></div>"#,
        );
        let div = node(&doc, "div");
        walk::remove_descendants_if(&div, is_extra_paragraph);

        assert_eq!(doc.select("p").length(), 2);
    }

    #[test]
    fn break_before_paragraph_is_removed() {
        let doc = Document::from("<div>x<br><p>para</p><br>y</div>");
        let div = node(&doc, "div");
        walk::remove_descendants_if(&div, is_break_before_paragraph);

        assert_eq!(doc.select("br").length(), 1);
    }

    #[test]
    fn single_cell_table_unwraps_to_p() {
        let doc = Document::from(
            "<div><table><tbody><tr><td>just <b>text</b></td></tr></tbody></table></div>",
        );
        let div = node(&doc, "div");
        walk::change_descendants(&div, unwrap_if_single_cell_table);

        assert!(!doc.select("table").exists());
        assert!(doc.select("div > p > b").exists());
    }

    #[test]
    fn single_cell_table_with_blocks_unwraps_to_div() {
        let doc = Document::from(
            "<section><table><tr><td><p>a</p><p>b</p></td></tr></table></section>",
        );
        let section = node(&doc, "section");
        walk::change_descendants(&section, unwrap_if_single_cell_table);

        assert!(!doc.select("table").exists());
        assert_eq!(doc.select("section > div > p").length(), 2);
    }

    #[test]
    fn multi_cell_table_is_kept() {
        let doc = Document::from(
            "<div><table><tr><td>a</td><td>b</td></tr></table></div>",
        );
        let div = node(&doc, "div");
        walk::change_descendants(&div, unwrap_if_single_cell_table);

        assert!(doc.select("table").exists());
    }
}
