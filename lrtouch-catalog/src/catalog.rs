pub use string_cache::DefaultAtom as Atom;

/// Image names a session may reference, and where their assets live.
///
/// An open catalog accepts any non-empty name and interns it on first use.
/// A closed catalog only accepts the names it was built with.
#[derive(Debug, Clone)]
pub struct ImageCatalog {
    names: Vec<Atom>,
    closed: bool,
    image_dir: String,
    extension: String,
}

impl ImageCatalog {
    pub fn open(image_dir: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            names: Vec::new(),
            closed: false,
            image_dir: image_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn closed<I, S>(image_dir: impl Into<String>, extension: impl Into<String>, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::open(image_dir, extension);
        for name in known {
            catalog.insert(name.as_ref());
        }
        catalog.closed = true;
        catalog
    }

    /// Intern a name and return its atom.
    ///
    /// Returns `None` for blank names, and for unknown names in a closed catalog.
    pub fn intern(&mut self, name: &str) -> Option<Atom> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if self.closed {
            let atom = Atom::from(name);
            return self.names.contains(&atom).then_some(atom);
        }
        Some(self.insert(name))
    }

    fn insert(&mut self, name: &str) -> Atom {
        let atom = Atom::from(name.trim());
        if !atom.is_empty() && !self.names.contains(&atom) {
            self.names.push(atom.clone());
        }
        atom
    }

    /// Position of a name in insertion order
    pub fn id_of(&self, name: &str) -> Option<usize> {
        let atom = Atom::from(name);
        self.names.iter().position(|a| *a == atom)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Asset path for an image, e.g. `images/cat.png`
    pub fn asset_path(&self, name: &str) -> String {
        format!("{}{}.{}", self.image_dir, name, self.extension)
    }
}

impl Default for ImageCatalog {
    fn default() -> Self {
        Self::open("images/", "png")
    }
}

/// Display label for an image name
pub fn label(name: &str) -> String {
    name.to_uppercase()
}
