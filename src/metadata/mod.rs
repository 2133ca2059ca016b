//! Coordinate discovery from a Maven POM.
//!
//! Only the project's own `groupId`, `artifactId` and `version` are read. Values
//! inherited from a `<parent>` block are not considered, and property
//! placeholders such as `${revision}` are taken literally.

use crate::bundler::{Error, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Maven coordinate of the project being bundled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Reverse-domain group, e.g. `com.example`
    pub group_id: String,

    /// Artifact name, e.g. `widget`
    pub artifact_id: String,

    /// Version string, e.g. `1.0.0`
    pub version: String,
}

impl Coordinate {
    /// Repository-relative directory: `<group as path>/<artifactId>/<version>`.
    pub fn repository_path(&self) -> PathBuf {
        let mut path: PathBuf = self.group_id.split('.').collect();
        path.push(&self.artifact_id);
        path.push(&self.version);
        path
    }

    /// File name the POM is staged under: `<artifactId>-<version>.pom`.
    pub fn pom_file_name(&self) -> String {
        format!("{}-{}.pom", self.artifact_id, self.version)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Reads the coordinate from the POM at `pom_path`.
///
/// # Errors
///
/// - [`Error::DescriptorParse`] if the file cannot be read or is not well-formed
/// - [`Error::MissingCoordinate`] if any of the three fields is absent or empty
pub async fn load_coordinate(pom_path: &Path) -> Result<Coordinate> {
    let xml = tokio::fs::read_to_string(pom_path)
        .await
        .map_err(|e| Error::DescriptorParse {
            path: pom_path.to_path_buf(),
            reason: e.to_string(),
        })?;

    parse_coordinate(&xml, pom_path)
}

/// Extracts the coordinate from POM text. `pom_path` is used for error reporting only.
pub fn parse_coordinate(xml: &str, pom_path: &Path) -> Result<Coordinate> {
    let fields = read_project_fields(xml).map_err(|reason| Error::DescriptorParse {
        path: pom_path.to_path_buf(),
        reason,
    })?;

    let mut missing = Vec::new();
    for (name, value) in [
        ("groupId", &fields.group_id),
        ("artifactId", &fields.artifact_id),
        ("version", &fields.version),
    ] {
        if value.as_deref().is_none_or(str::is_empty) {
            missing.push(name);
        }
    }

    match (fields.group_id, fields.artifact_id, fields.version) {
        (Some(group_id), Some(artifact_id), Some(version)) if missing.is_empty() => {
            let coordinate = Coordinate {
                group_id,
                artifact_id,
                version,
            };
            check_path_segments(&coordinate).map_err(|reason| Error::DescriptorParse {
                path: pom_path.to_path_buf(),
                reason,
            })?;
            Ok(coordinate)
        }
        _ => Err(Error::MissingCoordinate {
            path: pom_path.to_path_buf(),
            missing,
        }),
    }
}

/// Every coordinate value becomes a directory name under the staging root.
fn check_path_segments(coordinate: &Coordinate) -> std::result::Result<(), String> {
    let segments = coordinate
        .group_id
        .split('.')
        .map(|segment| ("groupId", segment))
        .chain([
            ("artifactId", coordinate.artifact_id.as_str()),
            ("version", coordinate.version.as_str()),
        ]);

    for (field, segment) in segments {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(format!("{field} has an empty or relative path segment"));
        }
        if segment.contains(['/', '\\']) {
            return Err(format!("{field} must not contain path separators"));
        }
    }
    Ok(())
}

/// Direct children of `<project>` we care about.
#[derive(Default)]
struct ProjectFields {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
}

impl ProjectFields {
    fn slot(&mut self, element: &str) -> Option<&mut Option<String>> {
        match element {
            "groupId" => Some(&mut self.group_id),
            "artifactId" => Some(&mut self.artifact_id),
            "version" => Some(&mut self.version),
            _ => None,
        }
    }
}

fn read_project_fields(xml: &str) -> std::result::Result<ProjectFields, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut fields = ProjectFields::default();
    // Element names from the document root down to the current position
    let mut stack: Vec<String> = Vec::new();
    let mut saw_project = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("malformed XML at byte {}: {e}", reader.buffer_position()))?;

        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                if stack.is_empty() {
                    if name != "project" {
                        return Err(format!("root element is <{name}>, expected <project>"));
                    }
                    saw_project = true;
                }
                stack.push(name);
            }
            Event::Empty(empty) => {
                let name = String::from_utf8_lossy(empty.local_name().as_ref()).into_owned();
                if stack.is_empty() && name == "project" {
                    saw_project = true;
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(text) if is_project_child(&stack) => {
                let value = text.unescape().map_err(|e| e.to_string())?;
                append_field(&mut fields, &stack, &value);
            }
            Event::CData(cdata) if is_project_child(&stack) => {
                let value = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                append_field(&mut fields, &stack, &value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_project {
        return Err("no <project> element found".to_string());
    }
    if !stack.is_empty() {
        return Err(format!("unclosed element <{}>", stack.join("><")));
    }

    Ok(fields)
}

fn is_project_child(stack: &[String]) -> bool {
    stack.len() == 2 && stack[0] == "project"
}

fn append_field(fields: &mut ProjectFields, stack: &[String], value: &str) {
    if let Some(slot) = fields.slot(&stack[1]) {
        slot.get_or_insert_with(String::new).push_str(value.trim());
    }
}
