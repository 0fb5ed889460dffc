use std::fmt::{Display, Write};

use crate::{arena::NodeArena, avl::height, node::NodeId, AvlTree};

impl<K, V> AvlTree<K, V>
where
    K: Display,
{
    /// Render the tree structure as a [Graphviz] DOT digraph, labelling each
    /// node with its key and height.
    ///
    /// [Graphviz]: https://graphviz.org/
    pub fn to_dot(&self) -> String {
        let mut buf = String::new();
        render(self.arena(), &mut buf).expect("writes to a String are infallible");
        buf
    }
}

fn render<K, V, W>(arena: &NodeArena<K, V, u8>, buf: &mut W) -> std::fmt::Result
where
    W: Write,
    K: Display,
{
    writeln!(buf, "digraph {{")?;
    writeln!(buf, r#"bgcolor = "transparent";"#)?;
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    )?;
    if let Some(root) = arena.root() {
        recurse(arena, root, buf)?;
    }
    writeln!(buf, "}}")
}

fn recurse<K, V, W>(arena: &NodeArena<K, V, u8>, id: NodeId, buf: &mut W) -> std::fmt::Result
where
    W: Write,
    K: Display,
{
    let key = arena.node(id).key();

    writeln!(
        buf,
        r#""{}" [label="{} | h={}"];"#,
        key,
        key,
        height(arena, Some(id)),
    )?;

    for v in [arena.left(id), arena.right(id)] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    key,
                    arena.node(v).key()
                )?;
                recurse(arena, v, buf)?;
            }
            None => {
                writeln!(buf, "\"null_{key}\" [shape=point,style=invis];")?;
                writeln!(buf, "\"{key}\" -> \"null_{key}\" [style=invis];")?;
            }
        };
    }

    Ok(())
}
