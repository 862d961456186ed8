use crate::analysis::SymbolSet;

pub trait Rendered {
    fn rendered(&self) -> String;
}

// `{(, i}`
impl Rendered for SymbolSet {
    fn rendered(&self) -> String {
        let items: Vec<&str> = self.iter().map(|s| s.as_str()).collect();
        format!("{{{}}}", items.join(", "))
    }
}

impl Rendered for Option<&SymbolSet> {
    fn rendered(&self) -> String {
        match self {
            Some(set) => set.rendered(),
            None => "nil".to_string(),
        }
    }
}
