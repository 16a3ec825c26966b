pub struct FooterItem {
    pub key: String,
    pub desc: &'static str,
    pub highlighted: bool,
}

impl FooterItem {
    pub fn new(key: impl Into<String>, desc: &'static str) -> Self {
        Self {
            key: key.into(),
            desc,
            highlighted: false,
        }
    }
}

pub struct FooterGroup {
    pub name: &'static str,
    pub items: Vec<FooterItem>,
}
