//! Driver entries.
//!
//! A driver folder contributes two things from its implementation file:
//!
//! ```typescript
//! export const capabilities = {
//!     /** Minimum temperature */
//!     min: "measure_temperature.min",
//!     temp: "measure_temperature",
//! };
//!
//! /**
//!  * Zone Temperature
//!  * #class:sensor
//!  */
//! export default class ZoneTemperatureDriver extends Driver {}
//! ```
//!
//! The extracted values are merged under the folder's `driver.compose.json` baseline,
//! which wins on every conflict.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::core::data::{CapabilityOption, Driver, Images, LString, SourceDecls};
use crate::core::error::{ComposeError, ComposeResult};
use crate::core::tags::{Tag, get_class_tag, has_tag, remove_tag_text, strip_tags};

/// Name of the module-level object literal listing capabilities.
const CAPABILITIES_VARIABLE: &str = "capabilities";

/// Build the driver of `folder` from its source declarations and baseline.
pub fn build_driver(folder: &str, decls: &SourceDecls, baseline: Driver) -> ComposeResult<Driver> {
    let extracted = extract_driver(decls)?;
    let mut driver = merge_baseline(extracted, baseline);

    if driver.class.is_none() {
        let text = decls
            .classes()
            .next()
            .and_then(|class| class.doc.as_ref())
            .map(|doc| doc.comment.clone())
            .unwrap_or_default();
        return Err(ComposeError::MissingTag {
            tag: Tag::Class,
            text,
        });
    }
    if driver.images.is_none() {
        driver.images = Some(Images::for_folder(folder));
    }
    if driver.id.is_none() {
        driver.id = Some(folder.to_string());
    }

    info!(
        "Found driver {} with {} capabilities",
        folder,
        driver.capabilities.len()
    );
    Ok(driver)
}

/// Driver fields found in source: capabilities, their options, name and class.
pub fn extract_driver(decls: &SourceDecls) -> ComposeResult<Driver> {
    let mut driver = Driver::default();
    let mut options: IndexMap<String, CapabilityOption> = IndexMap::new();

    for var in decls.variables().filter(|v| v.name == CAPABILITIES_VARIABLE) {
        for prop in &var.properties {
            let Some(capability) = &prop.value else {
                debug!("Ignoring non-literal capability {}", prop.key);
                continue;
            };
            if driver.capabilities.contains(capability) {
                continue;
            }
            driver.capabilities.push(capability.clone());

            if let Some(doc) = &prop.doc {
                let maintenance = has_tag(Tag::MaintenanceAction, &doc.comment);
                options.insert(
                    capability.clone(),
                    CapabilityOption {
                        title: LString::english(remove_tag_text(
                            Tag::MaintenanceAction,
                            &doc.comment,
                        )),
                        maintenance_action: maintenance.then_some(true),
                        extra: Default::default(),
                    },
                );
            }
        }
    }
    if !options.is_empty() {
        driver.capabilities_options = Some(options);
    }

    if let Some(class) = decls.classes().next() {
        let doc = class.doc.as_ref().ok_or_else(|| {
            ComposeError::MissingClassDoc(class.name.clone().unwrap_or_else(|| "default".to_string()))
        })?;
        driver.name = Some(LString::english(strip_tags(&doc.comment)));
        driver.class = get_class_tag(&doc.comment).ok().map(str::to_string);
    }

    Ok(driver)
}

/// Merge extracted values under a baseline. Fields present on the baseline win;
/// capability lists are joined baseline-first without duplicates.
pub fn merge_baseline(extracted: Driver, baseline: Driver) -> Driver {
    let mut capabilities = baseline.capabilities;
    for capability in extracted.capabilities {
        if !capabilities.contains(&capability) {
            capabilities.push(capability);
        }
    }

    let capabilities_options = match (baseline.capabilities_options, extracted.capabilities_options) {
        (Some(mut base), Some(found)) => {
            for (key, option) in found {
                base.entry(key).or_insert(option);
            }
            Some(base)
        }
        (base, found) => base.or(found),
    };

    let mut extra = baseline.extra;
    for (key, value) in extracted.extra {
        extra.entry(key).or_insert(value);
    }

    Driver {
        id: baseline.id.or(extracted.id),
        name: baseline.name.or(extracted.name),
        class: baseline.class.or(extracted.class),
        capabilities,
        capabilities_options,
        images: baseline.images.or(extracted.images),
        extra,
    }
}
