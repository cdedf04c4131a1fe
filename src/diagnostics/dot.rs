//! Graphviz rendering of the transition graph.

use crate::core::{State, Trigger};
use crate::diagnostics::info::MachineInfo;
use std::fmt::Debug;
use std::io::{self, Write};

/// Write `info` as a DOT digraph.
///
/// Every configured transition becomes an edge labelled with its trigger;
/// guarded edges are drawn dashed and untriggered ones carry no label.
/// Superstate links are drawn as dotted edges from substate to superstate.
pub fn write_dot<S: State, T: Trigger, W: Write>(
    info: &MachineInfo<S, T>,
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "digraph G {{")?;

    for state in &info.states {
        let source = quoted(&state.state);
        for transition in &state.transitions {
            let destination = quoted(&transition.destination);
            let mut attributes = Vec::new();
            if let Some(trigger) = &transition.trigger {
                attributes.push(format!("label={}", quoted(trigger)));
            }
            if transition.guarded {
                attributes.push("style=dashed".to_string());
            }

            if attributes.is_empty() {
                writeln!(out, "\t{source} -> {destination};")?;
            } else {
                writeln!(out, "\t{source} -> {destination} [{}];", attributes.join(", "))?;
            }
        }
    }

    for state in &info.states {
        if let Some(superstate) = &state.superstate {
            writeln!(
                out,
                "\t{} -> {} [style=dotted, arrowhead=empty];",
                quoted(&state.state),
                quoted(superstate)
            )?;
        }
    }

    writeln!(out, "}}")
}

/// Render `info` as a DOT string.
pub fn to_dot<S: State, T: Trigger>(info: &MachineInfo<S, T>) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_dot(info, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn quoted(value: &impl Debug) -> String {
    let text = format!("{value:?}").replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{text}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StateMachine;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Light {
        Off,
        On,
        Dimmed,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Switch {
        Toggle,
        Dim,
    }

    #[test]
    fn renders_edges_with_trigger_labels() {
        let mut machine: StateMachine<Light, Switch> = StateMachine::new(Light::Off);
        machine
            .configure(Light::Off)
            .permit(Switch::Toggle, Light::On)
            .unwrap();
        machine
            .configure(Light::On)
            .permit(Switch::Toggle, Light::Off)
            .unwrap()
            .permit_if(Switch::Dim, Light::Dimmed, || true)
            .unwrap();
        machine
            .configure(Light::Dimmed)
            .substate_of(Light::On)
            .external_transition(Light::Off, None);

        let dot = to_dot(&machine.info());

        assert!(dot.starts_with("digraph G {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("\t\"Off\" -> \"On\" [label=\"Toggle\"];\n"));
        assert!(dot.contains("\t\"On\" -> \"Dimmed\" [label=\"Dim\", style=dashed];\n"));
        assert!(dot.contains("\t\"Dimmed\" -> \"Off\";\n"));
        assert!(dot.contains("\t\"Dimmed\" -> \"On\" [style=dotted, arrowhead=empty];\n"));
    }

    #[test]
    fn string_states_are_escaped() {
        let mut machine: StateMachine<&str, &str> = StateMachine::new("idle");
        machine.configure("idle").permit("go", "busy").unwrap();

        let mut out = Vec::new();
        machine.write_dot(&mut out).unwrap();
        let dot = String::from_utf8(out).unwrap();

        assert!(dot.contains(r#""\"idle\"" -> "\"busy\"" [label="\"go\""];"#));
    }
}
