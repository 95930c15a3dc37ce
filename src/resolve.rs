use std::collections::BTreeSet;

use oxc_span::Span;

use crate::classify::{Classification, ComponentBody};
use crate::imports::fresh_name;
use crate::options::SynthesisOptions;

/// What the synthesized wrapper renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperBody {
    /// A bare expression, wrapped in a fragment.
    Fragment { root: Span },
    /// A default-exported component's own body, reused as written.
    Component(ComponentBody),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperComponent {
    pub name: String,
    pub body: WrapperBody,
}

/// Root component decision: what gets mounted, and whether a wrapper has to
/// be declared for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// `None` when an existing mount call is reused.
    pub mount_target: Option<String>,
    pub wrapper: Option<WrapperComponent>,
}

/// `taken` holds every module-scope name of the snippet, injected import
/// locals included. A synthesized wrapper never reuses one of them.
pub fn resolve(
    classification: &Classification,
    options: &SynthesisOptions,
    taken: &BTreeSet<String>,
) -> Resolution {
    let wrapper = |body| {
        let wrapper = WrapperComponent {
            name: fresh_name(&options.wrapper_name, taken),
            body,
        };
        Resolution {
            mount_target: Some(wrapper.name.clone()),
            wrapper: Some(wrapper),
        }
    };

    match classification {
        Classification::BareExpression { root, .. } => wrapper(WrapperBody::Fragment { root: *root }),
        Classification::DefaultExportComponent { body, .. } => {
            wrapper(WrapperBody::Component(*body))
        }
        Classification::NamedComponent { identifier, .. } => Resolution {
            mount_target: Some(identifier.clone()),
            wrapper: None,
        },
        Classification::CompleteApplication { .. } => Resolution {
            mount_target: None,
            wrapper: None,
        },
    }
}
