/// One of the mutually exclusive sections of the site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Home,
    Automatizacion,
    Web3d,
    IaMedia,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Automatizacion, View::Web3d, View::IaMedia];

    pub fn token(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Automatizacion => "automatizacion",
            View::Web3d => "web3d",
            View::IaMedia => "ia-media",
        }
    }

    pub fn from_token(token: &str) -> Option<View> {
        View::ALL.into_iter().find(|view| view.token() == token)
    }

    /// Reads a location fragment (`""`, `"#"`, `"#web3d"`). Anything unknown is the default view.
    pub fn from_fragment(fragment: &str) -> View {
        let token = fragment.strip_prefix('#').unwrap_or(fragment);
        if token.is_empty() {
            return View::default();
        }
        View::from_token(token).unwrap_or_default()
    }

    /// Fragment pushed into history. The default view keeps the bare address.
    pub fn fragment(self) -> String {
        if self == View::default() {
            String::new()
        } else {
            format!("#{}", self.token())
        }
    }

    pub fn element_id(self) -> String {
        format!("page-{}", self.token())
    }

    /// Class carried by the section of `self`, and by every link targeting it,
    /// while `current` is the highlighted or visible view.
    pub fn active_class(self, current: View) -> Option<&'static str> {
        (self == current).then_some("active")
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Inicio",
            View::Automatizacion => "Automatización",
            View::Web3d => "Web 3D",
            View::IaMedia => "IA Media",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_resolve_back_to_their_view() {
        for view in View::ALL {
            assert_eq!(View::from_token(view.token()), Some(view));
        }
        assert_eq!(View::from_token("contacto"), None);
        assert_eq!(View::from_token(""), None);
        assert_eq!(View::from_token("Home"), None);
    }

    #[test]
    fn empty_or_unknown_fragment_falls_back_to_home() {
        assert_eq!(View::from_fragment(""), View::Home);
        assert_eq!(View::from_fragment("#"), View::Home);
        assert_eq!(View::from_fragment("#pricing"), View::Home);
        assert_eq!(View::from_fragment("#ia-media"), View::IaMedia);
        assert_eq!(View::from_fragment("automatizacion"), View::Automatizacion);
    }

    #[test]
    fn home_fragment_is_empty() {
        assert_eq!(View::Home.fragment(), "");
        assert_eq!(View::Web3d.fragment(), "#web3d");
        assert_eq!(View::IaMedia.element_id(), "page-ia-media");
    }

    #[test]
    fn only_the_current_view_is_marked_active() {
        for highlighted in View::ALL {
            let active: Vec<View> = View::ALL
                .into_iter()
                .filter(|target| target.active_class(highlighted).is_some())
                .collect();
            assert_eq!(active, [highlighted]);
        }
        assert_eq!(View::Web3d.active_class(View::Web3d), Some("active"));
        assert_eq!(View::Home.active_class(View::Web3d), None);
    }
}
