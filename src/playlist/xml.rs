use std::{collections::HashMap, path::Path};

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};

use super::{Comparison, Condition, Limit, SmartPlaylist, SortBy, TrackCondition};
use crate::Res;

/// Root attributes MusicBee expects; only `MusicLibraryPath` varies per document.
pub const ROOT_ATTRIBUTES: [(&str, &str); 8] = [
    ("SaveStaticCopy", "False"),
    ("LiveUpdating", "True"),
    ("Layout", "4"),
    ("LayoutGroupBy", "0"),
    ("ShuffleMode", "None"),
    ("ShuffleSameArtistWeight", "0.5"),
    ("GroupBy", "track"),
    ("ConsolidateAlbums", "False"),
];

fn xml_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn parse_xml_bool(value: &str) -> Res<bool> {
    match value.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(format!("invalid boolean '{}'", other).into()),
    }
}

fn condition_start(condition: &Condition) -> BytesStart<'static> {
    BytesStart::new("Condition").with_attributes([
        ("Field", condition.field.as_str()),
        ("Comparison", condition.comparison.as_str()),
        ("Value", condition.value.as_str()),
    ])
}

impl SmartPlaylist {
    /// Serializes the document with an XML declaration, UTF-8 encoded.
    pub fn to_xml(&self) -> Res<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let root = BytesStart::new("SmartPlaylist")
            .with_attributes(ROOT_ATTRIBUTES)
            .with_attributes([("MusicLibraryPath", self.music_library_path.as_str())]);
        writer.write_event(Event::Start(root))?;

        writer.write_event(Event::Start(
            BytesStart::new("Source").with_attributes([("Type", "1")]),
        ))?;
        writer.write_event(Event::Start(
            BytesStart::new("Conditions").with_attributes([("CombineMethod", "Any")]),
        ))?;

        for track in &self.conditions {
            if track.all_of.is_empty() {
                writer.write_event(Event::Empty(condition_start(&track.title)))?;
                continue;
            }

            writer.write_event(Event::Start(condition_start(&track.title)))?;
            writer.write_event(Event::Start(
                BytesStart::new("And").with_attributes([("CombineMethod", "All")]),
            ))?;
            for condition in &track.all_of {
                writer.write_event(Event::Empty(condition_start(condition)))?;
            }
            writer.write_event(Event::End(BytesEnd::new("And")))?;
            writer.write_event(Event::End(BytesEnd::new("Condition")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("Conditions")))?;

        let count = self.limit.count.to_string();
        writer.write_event(Event::Empty(BytesStart::new("Limit").with_attributes([
            ("FilterDuplicates", xml_bool(self.limit.filter_duplicates)),
            ("Enabled", xml_bool(self.limit.enabled)),
            ("Count", count.as_str()),
            ("Type", self.limit.kind.as_str()),
            ("SelectedBy", self.limit.selected_by.as_str()),
        ])))?;
        writer.write_event(Event::Empty(BytesStart::new("SortBy").with_attributes([
            ("Field", self.sort_by.field.as_str()),
            ("Order", self.sort_by.order.as_str()),
        ])))?;

        writer.write_event(Event::End(BytesEnd::new("Source")))?;
        writer.write_event(Event::End(BytesEnd::new("SmartPlaylist")))?;

        Ok(String::from_utf8(writer.into_inner())?)
    }

    /// Writes the document to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> Res<()> {
        let xml = self.to_xml()?;
        std::fs::write(path, xml).map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
        Ok(())
    }

    /// Parses a document produced by [`SmartPlaylist::to_xml`].
    ///
    /// Fixed root attributes are not kept; elements this crate never writes are skipped.
    pub fn from_xml(xml: &str) -> Res<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut playlist: Option<SmartPlaylist> = None;
        let mut open: Vec<String> = Vec::new();
        let mut current: Option<TrackCondition> = None;

        loop {
            let (element, is_empty) = match reader.read_event()? {
                Event::Start(e) => (e, false),
                Event::Empty(e) => (e, true),
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    open.pop();
                    if name == "Condition" && open.last().map(String::as_str) == Some("Conditions")
                    {
                        if let Some(track) = current.take() {
                            document(&mut playlist)?.conditions.push(track);
                        }
                    }
                    continue;
                }
                Event::Eof => break,
                _ => continue,
            };

            let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
            let attrs = attributes(&element)?;

            match (name.as_str(), open.last().map(String::as_str)) {
                ("SmartPlaylist", None) => {
                    let library = attrs.get("MusicLibraryPath").cloned().unwrap_or_default();
                    playlist = Some(SmartPlaylist::new(library));
                }
                ("Condition", Some("Conditions")) => {
                    let track = TrackCondition {
                        title: condition_from(&attrs)?,
                        all_of: Vec::new(),
                    };
                    if is_empty {
                        document(&mut playlist)?.conditions.push(track);
                    } else {
                        current = Some(track);
                    }
                }
                ("Condition", Some("And")) => {
                    current
                        .as_mut()
                        .ok_or("And group outside of a track condition")?
                        .all_of
                        .push(condition_from(&attrs)?);
                }
                ("Limit", Some("Source")) => {
                    document(&mut playlist)?.limit = limit_from(&attrs)?;
                }
                ("SortBy", Some("Source")) => {
                    document(&mut playlist)?.sort_by = SortBy {
                        field: required(&attrs, "Field")?,
                        order: required(&attrs, "Order")?,
                    };
                }
                _ => {}
            }

            if !is_empty {
                open.push(name);
            }
        }

        playlist.ok_or_else(|| "missing SmartPlaylist element".into())
    }
}

fn document(playlist: &mut Option<SmartPlaylist>) -> Res<&mut SmartPlaylist> {
    playlist
        .as_mut()
        .ok_or_else(|| "element outside of SmartPlaylist".into())
}

fn attributes(element: &BytesStart<'_>) -> Res<HashMap<String, String>> {
    let mut attrs = HashMap::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

fn required(attrs: &HashMap<String, String>, key: &str) -> Res<String> {
    attrs
        .get(key)
        .cloned()
        .ok_or_else(|| format!("missing attribute '{}'", key).into())
}

fn condition_from(attrs: &HashMap<String, String>) -> Res<Condition> {
    Ok(Condition {
        field: required(attrs, "Field")?,
        comparison: required(attrs, "Comparison")?.parse::<Comparison>()?,
        value: required(attrs, "Value")?,
    })
}

fn limit_from(attrs: &HashMap<String, String>) -> Res<Limit> {
    Ok(Limit {
        filter_duplicates: parse_xml_bool(&required(attrs, "FilterDuplicates")?)?,
        enabled: parse_xml_bool(&required(attrs, "Enabled")?)?,
        count: required(attrs, "Count")?.parse()?,
        kind: required(attrs, "Type")?,
        selected_by: required(attrs, "SelectedBy")?,
    })
}
