use std::collections::HashMap;

use crate::models::{Definition, FileEntry};

/// Merge `incoming` onto `base`, matching entries by path.
///
/// Matched entries take every field `incoming` sets and union their natures;
/// unmatched entries are appended in their incoming order. `base` keeps its order.
pub fn merge_files(base: &mut Vec<FileEntry>, incoming: Vec<FileEntry>) {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(base.len());
    for (i, file) in base.iter().enumerate() {
        index.entry(file.path.clone()).or_insert(i);
    }

    for file in incoming {
        match index.get(&file.path) {
            Some(&i) => merge_file(&mut base[i], file),
            None => {
                index.insert(file.path.clone(), base.len());
                base.push(file);
            }
        }
    }
}

fn merge_file(target: &mut FileEntry, incoming: FileEntry) {
    if incoming.hashes.is_some() {
        target.hashes = incoming.hashes;
    }
    if incoming.token.is_some() {
        target.token = incoming.token;
    }
    if incoming.license.is_some() {
        target.license = incoming.license;
    }
    if let Some(natures) = incoming.natures {
        target
            .natures
            .get_or_insert_with(Default::default)
            .extend(natures);
    }
}

/// Merge `incoming` onto the definition's files, creating the list if needed.
pub fn merge_into_definition(definition: &mut Definition, incoming: Vec<FileEntry>) {
    match definition.files.as_mut() {
        Some(files) => merge_files(files, incoming),
        None if !incoming.is_empty() => definition.files = Some(incoming),
        None => {}
    }
}
