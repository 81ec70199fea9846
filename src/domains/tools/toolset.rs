//! Toolset gating.
//!
//! Tools are grouped into named [`Toolset`]s, each split into read tools and
//! write tools. A [`ToolsetGroup`] owns all toolsets and decides which tools
//! reach the server: only enabled toolsets register anything, and read-only
//! mode (per toolset or group-wide) suppresses write tools.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::error::ToolsetError;
use super::handlers::Tool;

/// Anything tools can be registered with.
pub trait ToolServer {
    fn add_tools(&mut self, tools: Vec<Tool>);
}

/// A named bundle of related tools.
pub struct Toolset {
    name: String,
    description: String,
    enabled: bool,
    read_only: bool,
    read_tools: Vec<Tool>,
    write_tools: Vec<Tool>,
}

impl std::fmt::Debug for Toolset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolset")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("read_only", &self.read_only)
            .field("read_tools", &tool_names(&self.read_tools))
            .field("write_tools", &tool_names(&self.write_tools))
            .finish()
    }
}

fn tool_names(tools: &[Tool]) -> Vec<&'static str> {
    tools.iter().map(|t| t.name()).collect()
}

impl Toolset {
    /// Create a disabled, writable toolset with no tools.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            enabled: false,
            read_only: false,
            read_tools: Vec::new(),
            write_tools: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn add_read_tools(mut self, tools: impl IntoIterator<Item = Tool>) -> Self {
        self.read_tools.extend(tools);
        self
    }

    pub fn add_write_tools(mut self, tools: impl IntoIterator<Item = Tool>) -> Self {
        self.write_tools.extend(tools);
        self
    }

    /// Restrict this toolset to its read tools.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn read_tools(&self) -> &[Tool] {
        &self.read_tools
    }

    pub fn write_tools(&self) -> &[Tool] {
        &self.write_tools
    }

    /// Tools this toolset would register, given the group's read-only flag.
    pub fn active_tools(&self, group_read_only: bool) -> Vec<Tool> {
        if !self.enabled {
            return Vec::new();
        }
        let mut tools = self.read_tools.clone();
        if !(self.read_only || group_read_only) {
            tools.extend(self.write_tools.iter().cloned());
        }
        tools
    }

    /// Register the active tools with `server`. A disabled toolset does
    /// nothing.
    pub fn register_tools(&self, server: &mut dyn ToolServer, group_read_only: bool) {
        if !self.enabled {
            return;
        }
        let tools = self.active_tools(group_read_only);
        debug!(
            toolset = %self.name,
            count = tools.len(),
            "Registering toolset"
        );
        server.add_tools(tools);
    }
}

/// The set of all toolsets known to the server.
#[derive(Debug, Default)]
pub struct ToolsetGroup {
    toolsets: BTreeMap<String, Toolset>,
    everything_on: bool,
    read_only: bool,
}

impl ToolsetGroup {
    pub fn new(read_only: bool) -> Self {
        Self {
            toolsets: BTreeMap::new(),
            everything_on: false,
            read_only,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Add a toolset, replacing any previous toolset of the same name.
    pub fn add_toolset(&mut self, toolset: Toolset) {
        self.toolsets.insert(toolset.name.clone(), toolset);
    }

    pub fn toolset(&self, name: &str) -> Option<&Toolset> {
        self.toolsets.get(name)
    }

    pub fn toolsets(&self) -> impl Iterator<Item = &Toolset> {
        self.toolsets.values()
    }

    /// Enable the toolset called `name`.
    pub fn enable_toolset(&mut self, name: &str) -> Result<(), ToolsetError> {
        let toolset = self
            .toolsets
            .get_mut(name)
            .ok_or_else(|| ToolsetError::Unknown(name.to_string()))?;
        toolset.enable();
        Ok(())
    }

    /// Enable each named toolset. An empty list enables every toolset.
    ///
    /// All names are checked before anything is enabled, so an unknown name
    /// leaves the group untouched.
    pub fn enable_toolsets<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), ToolsetError> {
        if names.is_empty() {
            self.everything_on = true;
            for toolset in self.toolsets.values_mut() {
                toolset.enable();
            }
            info!("Enabled all toolsets");
            return Ok(());
        }

        let names: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        if let Some(unknown) = names
            .iter()
            .find(|name| !self.toolsets.contains_key(**name))
        {
            return Err(ToolsetError::Unknown(unknown.to_string()));
        }

        for name in &names {
            self.enable_toolset(name)?;
        }
        info!(toolsets = ?names, "Enabled toolsets");
        Ok(())
    }

    /// Whether the last `enable_toolsets` call enabled everything.
    pub fn everything_on(&self) -> bool {
        self.everything_on
    }

    /// Register the tools of every enabled toolset with `server`.
    pub fn register_tools(&self, server: &mut dyn ToolServer) {
        for toolset in self.toolsets.values() {
            toolset.register_tools(server, self.read_only);
        }
    }
}
