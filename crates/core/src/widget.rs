#![forbid(unsafe_code)]

use crate::command::{Bindings, Command, MenuEntry, bind, emit, render_script};
use crate::error::TreeError;
use crate::ids::{ActionToken, ContainerId};
use crate::source::{RecordSource, SourceConfig};
use crate::tree::build;
use tracing::{debug, warn};

const DEFAULT_TAG_NAME: &str = "div";

/// Everything one tree widget needs besides its records.
#[derive(Clone, Debug)]
pub struct WidgetConfig {
    source: SourceConfig,
    collapsed: bool,
    bindings: Bindings,
    tag_name: String,
}

impl WidgetConfig {
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            collapsed: false,
            bindings: Bindings::new(),
            tag_name: DEFAULT_TAG_NAME.to_string(),
        }
    }

    /// Renders every node closed.
    pub fn collapse(&mut self) -> &mut Self {
        self.collapsed = true;
        self
    }

    pub fn set_item_action(&mut self, action_id: ActionToken) -> &mut Self {
        self.bindings.set_select(action_id);
        self
    }

    pub fn add_context_action(
        &mut self,
        label: impl Into<String>,
        action_id: ActionToken,
    ) -> &mut Self {
        self.bindings.add_menu_entry(MenuEntry::new(label, action_id));
        self
    }

    /// Element name of the mount point. Only ASCII letters and digits are
    /// accepted, starting with a letter; a rejected name leaves the tag as is.
    pub fn tag_name(&mut self, tag_name: &str) -> Result<&mut Self, TagNameError> {
        validate_tag_name(tag_name)?;
        self.tag_name = tag_name.to_ascii_lowercase();
        Ok(self)
    }

    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn mount_tag(&self) -> &str {
        &self.tag_name
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagNameError {
    Empty,
    InvalidFirstChar,
    InvalidChar { ch: char, index: usize },
}

impl TagNameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "tag name must not be empty",
            Self::InvalidFirstChar => "tag name must start with a letter",
            Self::InvalidChar { .. } => "tag name may only contain [A-Za-z0-9]",
        }
    }
}

fn validate_tag_name(value: &str) -> Result<(), TagNameError> {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err(TagNameError::Empty);
    };
    if !first.is_ascii_alphabetic() {
        return Err(TagNameError::InvalidFirstChar);
    }
    for (index, ch) in value.chars().enumerate().skip(1) {
        if !ch.is_ascii_alphanumeric() {
            return Err(TagNameError::InvalidChar { ch, index });
        }
    }
    Ok(())
}

#[derive(Debug)]
pub enum RenderError<E> {
    Source(E),
    Tree(TreeError),
}

impl<E: std::fmt::Display> std::fmt::Display for RenderError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "record source: {err}"),
            Self::Tree(err) => write!(f, "tree: {err}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RenderError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Tree(err) => Some(err),
        }
    }
}

impl<E> From<TreeError> for RenderError<E> {
    fn from(value: TreeError) -> Self {
        Self::Tree(value)
    }
}

/// Result of one render pass: the complete command sequence plus where the
/// renderer should mount it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutput {
    pub container: ContainerId,
    pub tag_name: String,
    pub commands: Vec<Command>,
}

impl RenderOutput {
    pub fn script(&self) -> String {
        render_script(&self.container, &self.commands)
    }

    /// Mount element followed by the script that fills it.
    pub fn html(&self) -> String {
        format!(
            "<{tag} id=\"{id}\"></{tag}>\n<script type=\"text/javascript\">\n{script}</script>\n",
            tag = self.tag_name,
            id = self.container.as_str(),
            script = self.script(),
        )
    }
}

/// Fetches, builds, emits and binds in sequence. Any failure aborts the pass
/// and no commands are returned.
pub fn render<S: RecordSource>(
    source: &mut S,
    config: &WidgetConfig,
    container: ContainerId,
) -> Result<RenderOutput, RenderError<S::Error>> {
    let records = source.fetch(&config.source).map_err(RenderError::Source)?;
    debug!(
        records = records.len(),
        collection = config.source.collection.as_str(),
        "records fetched"
    );

    let commands = assemble(&records, config).inspect_err(|err| {
        warn!(container = container.as_str(), error = %err, "render pass rejected");
    })?;

    Ok(RenderOutput {
        container,
        tag_name: config.tag_name.clone(),
        commands,
    })
}

fn assemble(
    records: &[crate::tree::Record],
    config: &WidgetConfig,
) -> Result<Vec<Command>, TreeError> {
    let tree = build(records)?;
    let mut commands = emit(&tree, config.collapsed)?;
    commands.extend(bind(&config.bindings)?);
    Ok(commands)
}
