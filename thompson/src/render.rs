//! Render automata to graphviz `.dot` files.
//!
//! Generally, use `nfa.render_to(filename, RenderSettings::default())` for the most basic
//! rendering. To draw one frame of a [trace](crate::trace), highlight the active states of that
//! step with [`RenderSettings::with_highlighted`].

use crate::{Nfa, StateId, Symbol, Transition};
use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

/// Global settings related to rendering automata.
pub struct RenderSettings {
    /// Whether to display the symbol next to each edge
    pub show_edge_labels: bool,
    /// The title which should be displayed above the graph.
    ///
    /// Defaults to the filename given to [`Nfa::render_to`].
    pub title: Option<String>,
    /// States drawn filled, e.g. the active states of a trace step.
    pub highlighted: BTreeSet<StateId>,
}

impl RenderSettings {
    /// Sets the name of the automaton
    pub fn with_name(mut self, name: impl AsRef<str>) -> Self {
        self.title = Some(name.as_ref().to_string());
        self
    }

    /// Fills the given states.
    pub fn with_highlighted(mut self, states: impl IntoIterator<Item = StateId>) -> Self {
        self.highlighted = states.into_iter().collect();
        self
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            show_edge_labels: true,
            title: None,
            highlighted: BTreeSet::new(),
        }
    }
}

fn state_to_node_name(s: StateId) -> String {
    format!("state_{}", s.0)
}

fn escape_text(inp: &str) -> String {
    inp.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Nfa {
    /// Visualize the automaton as a graph, by emitting a graphviz dot file.
    pub fn render<W: Write>(&self, output: &mut W, settings: RenderSettings) -> io::Result<()> {
        writeln!(output, "digraph {{")?;
        writeln!(output, r#"rankdir="LR";"#)?;

        if let Some(ref i) = settings.title {
            // title
            writeln!(output, r#"labelloc="t";"#)?;
            writeln!(output, r#"label="{}";"#, escape_text(i))?;
        }

        // invisible node the entry arrow starts from
        writeln!(output, r#"entry [shape="point", style="invis"]"#)?;

        // nodes
        for &state in self.states() {
            let name = state_to_node_name(state);

            let mut attrs = Vec::new();

            if state == self.accept() {
                attrs.push(r#"[shape="doublecircle"]"#.to_string())
            } else {
                attrs.push(r#"[shape="circle"]"#.to_string())
            };
            attrs.push(format!(r#"[label="{state}"]"#));

            if settings.highlighted.contains(&state) {
                attrs.push(r#"[style="filled", fillcolor="lightblue"]"#.to_string());
            }

            writeln!(output, r#"{name} {}"#, attrs.join(""))?
        }

        writeln!(output, "entry -> {}", state_to_node_name(self.start()))?;

        // edges
        for Transition { from, symbol, to } in self.transitions() {
            let from = state_to_node_name(from);
            let to = state_to_node_name(to);
            let style = match symbol {
                Symbol::Char(_) => "solid",
                Symbol::Epsilon => "dashed",
            };

            if settings.show_edge_labels {
                let label = escape_text(&symbol.to_string());
                writeln!(output, r#"{from} -> {to} [label="{label}", style="{style}"]"#)?
            } else {
                writeln!(output, r#"{from} -> {to} [style="{style}"]"#)?
            }
        }

        writeln!(output, "}}")?;

        Ok(())
    }

    /// [`render`](Nfa::render) directly to a file.
    pub fn render_to(
        &self,
        path: impl AsRef<Path>,
        mut settings: RenderSettings,
    ) -> io::Result<()> {
        let path = path.as_ref();
        let mut w = File::create(path)?;

        if settings.title.is_none() {
            settings.title = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string());
        }

        self.render(&mut w, settings)
    }
}
