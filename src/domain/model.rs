use crate::utils::error::{DiagramError, Result};
use crate::utils::validation::{find_duplicate, validate_non_empty_string};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Signal-space identifier carried by ports, terminals and wires.
pub type TypeTag = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Processor {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Parent")]
    pub parent: TypeTag,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Ports")]
    pub ports: Vec<TypeTag>,
    #[serde(rename = "Terminals")]
    pub terminals: Vec<TypeTag>,
}

impl Processor {
    pub fn new(
        id: impl Into<String>,
        parent: impl Into<String>,
        name: impl Into<String>,
        ports: &[&str],
        terminals: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            name: name.into(),
            ports: ports.iter().map(|t| t.to_string()).collect(),
            terminals: terminals.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn port(&self, index: usize) -> Option<&str> {
        self.ports.get(index).map(String::as_str)
    }

    pub fn terminal(&self, index: usize) -> Option<&str> {
        self.terminals.get(index).map(String::as_str)
    }
}

/// (processor id, slot index) pair. Serialized as a two-element array, e.g. `["f", 0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, usize)", into = "(String, usize)")]
pub struct Endpoint {
    pub processor: String,
    pub index: usize,
}

impl Endpoint {
    pub fn new(processor: impl Into<String>, index: usize) -> Self {
        Self {
            processor: processor.into(),
            index,
        }
    }
}

impl From<(String, usize)> for Endpoint {
    fn from((processor, index): (String, usize)) -> Self {
        Self { processor, index }
    }
}

impl From<Endpoint> for (String, usize) {
    fn from(endpoint: Endpoint) -> Self {
        (endpoint.processor, endpoint.index)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.processor, self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Parent")]
    pub parent: TypeTag,
    #[serde(rename = "Name")]
    pub name: String,
    /// (processor id, terminal index)
    #[serde(rename = "Source")]
    pub source: Endpoint,
    /// (processor id, port index)
    #[serde(rename = "Destination")]
    pub destination: Endpoint,
}

impl Wire {
    pub fn new(
        id: impl Into<String>,
        parent: impl Into<String>,
        name: impl Into<String>,
        source: (&str, usize),
        destination: (&str, usize),
    ) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            name: name.into(),
            source: Endpoint::new(source.0, source.1),
            destination: Endpoint::new(destination.0, destination.1),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source.processor == self.destination.processor
    }
}

#[derive(Debug, Deserialize)]
struct RawModel {
    processors: Vec<Processor>,
    wires: Vec<Wire>,
}

/// A wiring graph. Immutable once built; processor IDs are guaranteed unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawModel")]
pub struct Model {
    processors: Vec<Processor>,
    wires: Vec<Wire>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Model {
    pub fn new(processors: Vec<Processor>, wires: Vec<Wire>) -> Result<Self> {
        for processor in &processors {
            validate_non_empty_string("processors.ID", &processor.id).map_err(|_| {
                DiagramError::MalformedModel {
                    message: format!("processor '{}' has an empty ID", processor.name),
                }
            })?;
        }

        if let Some(id) = find_duplicate(processors.iter().map(|p| p.id.as_str())) {
            return Err(DiagramError::DuplicateProcessorId { id: id.to_string() });
        }

        let index = processors
            .iter()
            .enumerate()
            .map(|(position, p)| (p.id.clone(), position))
            .collect();

        Ok(Self {
            processors,
            wires,
            index,
        })
    }

    /// 從 JSON 字串載入模型
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn processor(&self, id: &str) -> Option<&Processor> {
        self.index.get(id).map(|&position| &self.processors[position])
    }
}

impl TryFrom<RawModel> for Model {
    type Error = DiagramError;

    fn try_from(raw: RawModel) -> Result<Self> {
        Model::new(raw.processors, raw.wires)
    }
}

/// A required signature: multisets of input (`Domain`) and output (`Codomain`) tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Domain", default)]
    pub domain: Vec<TypeTag>,
    #[serde(rename = "Codomain", default)]
    pub codomain: Vec<TypeTag>,
}

impl Block {
    pub fn new(id: impl Into<String>, domain: &[&str], codomain: &[&str]) -> Self {
        Self {
            id: id.into(),
            domain: domain.iter().map(|t| t.to_string()).collect(),
            codomain: codomain.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Which interface view the signature matcher compares against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Basic,
    #[default]
    Effective,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Basic => write!(f, "basic"),
            ViewMode::Effective => write!(f, "effective"),
        }
    }
}
