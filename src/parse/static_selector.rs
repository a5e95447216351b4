use std::sync::OnceLock;

use scraper::Selector;

/// A CSS selector parsed on first use and shared afterwards.
#[derive(Debug)]
pub(crate) struct StaticSelector {
    cell: OnceLock<Selector>,
    css: &'static str,
}

impl StaticSelector {
    pub(crate) const fn new(css: &'static str) -> Self {
        Self {
            cell: OnceLock::new(),
            css,
        }
    }
}

impl core::ops::Deref for StaticSelector {
    type Target = Selector;

    fn deref(&self) -> &Self::Target {
        // the selectors are string literals in this crate, so a parse failure is a typo
        self.cell.get_or_init(|| {
            Selector::parse(self.css)
                .unwrap_or_else(|e| panic!("invalid static selector {}: {e:?}", self.css))
        })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}
