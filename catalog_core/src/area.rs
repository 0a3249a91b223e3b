use crate::error::CatalogError;
use crate::file_id::{FileId, FileIdKey};
use crate::identifier::Identifier;
use crate::object::{ObjectCategory, ObjectId, Scope, SchemaObject};
use std::collections::HashMap;

/// A named filesystem location set (§4.6).
pub struct Area {
    pub object: SchemaObject,
    pub paths: Vec<String>,
}

impl Area {
    pub fn new(id: ObjectId, database_id: ObjectId, name: Identifier, paths: Vec<String>) -> Self {
        Self {
            object: SchemaObject::new(
                id,
                Some(database_id),
                name,
                ObjectCategory::Area,
                Scope::Permanent,
                database_id,
            ),
            paths,
        }
    }
}

/// Many-to-many link between an Area and any object that can live in
/// one (Table, Index, File) — §3 relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AreaContent {
    pub area_id: ObjectId,
    pub object_id: ObjectId,
}

/// Owns the Area → object assignment table and resolves effective
/// paths into a `FileId` at File-creation time (§4.6).
#[derive(Default)]
pub struct AreaContentTable {
    areas: HashMap<ObjectId, Area>,
    links: Vec<AreaContent>,
}

impl AreaContentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_area(&mut self, area: Area) {
        self.areas.insert(area.object.id, area);
    }

    pub fn assign(&mut self, area_id: ObjectId, object_id: ObjectId) -> Result<(), CatalogError> {
        if !self.areas.contains_key(&area_id) {
            return Err(CatalogError::BadArgument(format!(
                "unknown area {:?}",
                area_id
            )));
        }
        self.links.push(AreaContent { area_id, object_id });
        Ok(())
    }

    fn areas_for(&self, object_id: ObjectId) -> Vec<&Area> {
        self.links
            .iter()
            .filter(|l| l.object_id == object_id)
            .filter_map(|l| self.areas.get(&l.area_id))
            .collect()
    }

    /// Emit the effective area path(s) into the FileID for a newly
    /// created File (§4.6 `setAreaPath`).
    pub fn set_area_path(&self, object_id: ObjectId, file_id: &mut FileId) {
        let paths: Vec<String> = self
            .areas_for(object_id)
            .into_iter()
            .flat_map(|a| a.paths.iter().cloned())
            .collect();
        if !paths.is_empty() {
            file_id.set_path_vec(FileIdKey::AreaPath, paths);
        }
    }

    /// Enforce that no two non-sibling objects share a path that would
    /// create an ambiguity (§4.6 `checkRelatedPath`).
    ///
    /// Sibling objects are those sharing the same `parent_object_id`
    /// (e.g. two indexes on the same table); they may legitimately
    /// share an area and thus a path.
    pub fn check_related_path(
        &self,
        candidate_object_id: ObjectId,
        candidate_parent: ObjectId,
        existing_parents: impl Fn(ObjectId) -> Option<ObjectId>,
    ) -> Result<(), CatalogError> {
        let candidate_paths: std::collections::HashSet<&str> = self
            .areas_for(candidate_object_id)
            .into_iter()
            .flat_map(|a| a.paths.iter().map(String::as_str))
            .collect();
        if candidate_paths.is_empty() {
            return Ok(());
        }
        for link in &self.links {
            if link.object_id == candidate_object_id {
                continue;
            }
            let Some(other_parent) = existing_parents(link.object_id) else {
                continue;
            };
            if other_parent == candidate_parent {
                continue; // siblings may share a path
            }
            if let Some(area) = self.areas.get(&link.area_id) {
                if area.paths.iter().any(|p| candidate_paths.contains(p.as_str())) {
                    return Err(CatalogError::BadArgument(format!(
                        "path conflict: object {:?} and {:?} are not siblings but share an area path",
                        candidate_object_id, link.object_id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_area_path_populates_file_id() {
        let mut table = AreaContentTable::new();
        table.add_area(Area::new(
            ObjectId(1),
            ObjectId(100),
            Identifier::new("a1").unwrap(),
            vec!["/data/a1".into()],
        ));
        table.assign(ObjectId(1), ObjectId(50)).unwrap();

        let mut fid = FileId::new();
        table.set_area_path(ObjectId(50), &mut fid);
        assert_eq!(
            fid.get_path_vec(FileIdKey::AreaPath).unwrap(),
            Some(["/data/a1".to_string()].as_slice())
        );
    }

    #[test]
    fn siblings_may_share_a_path_non_siblings_may_not() {
        let mut table = AreaContentTable::new();
        table.add_area(Area::new(
            ObjectId(1),
            ObjectId(100),
            Identifier::new("a1").unwrap(),
            vec!["/data/shared".into()],
        ));
        table.assign(ObjectId(1), ObjectId(10)).unwrap(); // file under table 5
        table.assign(ObjectId(1), ObjectId(11)).unwrap(); // file under table 5 (sibling)

        let parent_of = |id: ObjectId| -> Option<ObjectId> {
            match id.0 {
                10 | 11 => Some(ObjectId(5)),
                12 => Some(ObjectId(6)),
                _ => None,
            }
        };

        assert!(table.check_related_path(ObjectId(10), ObjectId(5), parent_of).is_ok());

        table.assign(ObjectId(1), ObjectId(12)).unwrap(); // different table
        assert!(table.check_related_path(ObjectId(12), ObjectId(6), parent_of).is_err());
    }
}
