use crate::grammar::Production;
use crate::table::Table;
use crate::tree::{Compact, NodeId, Pretty, Tree};

use std::fmt;

impl fmt::Display for Production {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        for sym in self.symbols() {
            write!(w, "{}", sym)?;
        }
        Ok(())
    }
}

// `F[(] = (E)`, one cell per line, terminals sorted within each row.
impl fmt::Display for Table {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        for (nt, row) in self.rows.iter() {
            let mut cells: Vec<_> = row.iter().collect();
            cells.sort_by(|a, b| a.0.cmp(b.0));
            for (t, production) in cells {
                writeln!(w, "{}[{}] = {}", nt, t, production)?;
            }
        }
        Ok(())
    }
}

struct Position(Option<usize>);

impl fmt::Display for Position {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(p) => write!(w, "{}", p),
            None => write!(w, "_"),
        }
    }
}

enum Step { Open(NodeId), Close }

impl fmt::Display for Compact<'_> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        let tree: &Tree = self.0;
        let mut stack = vec![Step::Open(tree.root())];
        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Close => { write!(w, ")")?; continue; }
                Step::Open(id) => id,
            };
            let n = &tree[id];
            write!(w, "({}[{},{}]:", n.name(), Position(n.position()), n.index())?;
            stack.push(Step::Close);
            stack.extend(n.children().iter().rev().map(|&c| Step::Open(c)));
        }
        Ok(())
    }
}

impl fmt::Display for Pretty<'_> {
    fn fmt(&self, w: &mut fmt::Formatter) -> fmt::Result {
        let pad = " ".repeat(self.indent.saturating_sub(1));
        let mut stack = vec![(self.tree.root(), 0)];
        while let Some((id, depth)) = stack.pop() {
            let n = &self.tree[id];
            for _ in 0..depth {
                write!(w, "┊{}", pad)?;
            }
            write!(w, "{}[{},{}]", n.name(), Position(n.position()), n.index())?;
            if n.is_inherited() {
                write!(w, "*")?;
            }
            writeln!(w)?;
            stack.extend(n.children().iter().rev().map(|&c| (c, depth + 1)));
        }
        Ok(())
    }
}
