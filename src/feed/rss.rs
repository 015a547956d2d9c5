//! RSS 2.0 serialization.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::FeedError;
use crate::models::{Feed, FeedItem};

/// Dublin Core elements namespace, declared when items use `<dc:creator>`
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

/// Serialize a feed as an RSS 2.0 document with a UTF-8 XML declaration.
pub fn to_xml(feed: &Feed) -> Result<String, FeedError> {
    let mut writer = RssWriter::new();
    writer.document(feed)?;
    writer.finish()
}

struct RssWriter {
    inner: Writer<Vec<u8>>,
}

impl RssWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn document(&mut self, feed: &Feed) -> Result<(), FeedError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        if feed.field_style.needs_dc_namespace() {
            rss.push_attribute(("xmlns:dc", DC_NAMESPACE));
        }
        self.event(Event::Start(rss))?;
        self.event(Event::Start(BytesStart::new("channel")))?;
        self.text_element("title", &feed.title)?;

        let summary_element = feed.field_style.element();
        for item in &feed.items {
            self.item(item, summary_element)?;
        }

        self.event(Event::End(BytesEnd::new("channel")))?;
        self.event(Event::End(BytesEnd::new("rss")))
    }

    fn item(&mut self, item: &FeedItem, summary_element: &str) -> Result<(), FeedError> {
        self.event(Event::Start(BytesStart::new("item")))?;
        self.cdata_element("title", &item.title)?;
        self.text_element("link", &item.link)?;
        self.cdata_element(summary_element, &item.author_summary)?;
        self.text_element("pubDate", &item.pub_date)?;
        self.event(Event::End(BytesEnd::new("item")))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), FeedError> {
        self.event(Event::Start(BytesStart::new(name)))?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn cdata_element(&mut self, name: &str, text: &str) -> Result<(), FeedError> {
        self.event(Event::Start(BytesStart::new(name)))?;
        for section in cdata_sections(text) {
            self.event(Event::CData(BytesCData::new(section)))?;
        }
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), FeedError> {
        self.inner
            .write_event(event)
            .map_err(|e| FeedError::Render(format!("XML write failed: {}", e)))
    }

    fn finish(self) -> Result<String, FeedError> {
        let mut bytes = self.inner.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| FeedError::Render(format!("Invalid UTF-8: {}", e)))
    }
}

/// Split `text` so no section contains the `]]>` terminator.
fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        sections.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    sections.push(rest);
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldStyle;

    fn sample_feed(style: FieldStyle) -> Feed {
        let mut feed = Feed::new(style);
        feed.items.push(FeedItem {
            title: "Dark <Matter> & Co".to_string(),
            link: "https://inspirehep.net/literature/1".to_string(),
            author_summary: "A, B, C, et al.".to_string(),
            pub_date: "Mon, 01 Jan 2024 00:00:00 GMT".to_string(),
        });
        feed
    }

    #[test]
    fn test_document_envelope() {
        let xml = to_xml(&sample_feed(FieldStyle::Description)).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<rss version="2.0">"#));
        assert!(xml.contains("<title>Papers</title>"));
        assert!(xml.contains("<title><![CDATA[Dark <Matter> & Co]]></title>"));
        assert!(xml.contains("<description><![CDATA[A, B, C, et al.]]></description>"));
        assert!(xml.contains("<pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>"));
        assert!(!xml.contains("xmlns:dc"));
    }

    #[test]
    fn test_dc_creator_declares_namespace() {
        let xml = to_xml(&sample_feed(FieldStyle::DcCreator)).unwrap();
        assert!(xml.contains(r#"xmlns:dc="http://purl.org/dc/elements/1.1/""#));
        assert!(xml.contains("<dc:creator><![CDATA[A, B, C, et al.]]></dc:creator>"));
        assert!(!xml.contains("<description>"));
    }

    #[test]
    fn test_empty_feed_has_no_items() {
        let xml = to_xml(&Feed::new(FieldStyle::Description)).unwrap();
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_cdata_sections_split_terminator() {
        assert_eq!(cdata_sections("plain"), vec!["plain"]);
        assert_eq!(cdata_sections("a]]>b"), vec!["a]]", ">b"]);
        assert_eq!(cdata_sections("]]>]]>"), vec!["]]", ">]]", ">"]);
    }

    #[test]
    fn test_cdata_terminator_in_title() {
        let mut feed = sample_feed(FieldStyle::Description);
        feed.items[0].title = "x]]>y".to_string();
        let xml = to_xml(&feed).unwrap();
        assert!(xml.contains("<![CDATA[x]]]]><![CDATA[>y]]>"));
    }
}
