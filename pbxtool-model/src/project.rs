use crate::error::{ModelError, ModelResult};
use crate::file_types::{PhaseKind, classify};
use crate::isa;
use crate::parse::parse_plist;
use crate::value::{Dict, Object, ObjectId, Objects, Value};
use crate::write::write_project;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tracing::{debug, info};

/// Options for [`XcodeProject::add_file`].
#[derive(Debug, Clone)]
pub struct FileOptions {
    /// Create a `PBXBuildFile` in the matching build phase of each selected target.
    pub create_build_files: bool,
    /// Restrict build entries to this target; `None` means every native target.
    pub target_name: Option<String>,
    /// Group receiving the reference; `None` means the main group.
    pub parent: Option<ObjectId>,
    pub source_tree: String,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            create_build_files: true,
            target_name: None,
            parent: None,
            source_tree: "SOURCE_ROOT".to_string(),
        }
    }
}

/// A loaded `project.pbxproj`.
#[derive(Debug, Clone)]
pub struct XcodeProject {
    path: Utf8PathBuf,
    header: Dict,
    objects: Objects,
}

impl XcodeProject {
    pub fn load(path: &Utf8Path) -> ModelResult<Self> {
        debug!(path = %path, "loading project");
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse manifest text; `path` is where [`XcodeProject::save`] will write.
    pub fn parse(text: &str, path: &Utf8Path) -> ModelResult<Self> {
        let Value::Dict(mut header) = parse_plist(text)? else {
            return Err(ModelError::structure("root value is not a dictionary"));
        };
        let Some(Value::Dict(raw_objects)) = header.remove("objects") else {
            return Err(ModelError::structure("missing `objects` dictionary"));
        };
        if header.get("rootObject").and_then(Value::as_str).is_none() {
            return Err(ModelError::structure("missing `rootObject`"));
        }

        let mut objects = Objects::default();
        for (id, raw) in raw_objects {
            let Value::Dict(dict) = raw else {
                return Err(ModelError::structure(format!(
                    "object {id} is not a dictionary"
                )));
            };
            let object = Object::from_dict(&id, dict)?;
            objects.insert(ObjectId::new(id), object);
        }
        debug!(objects = objects.len(), "parsed project");

        Ok(Self {
            path: path.to_path_buf(),
            header,
            objects,
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn header(&self) -> &Dict {
        &self.header
    }

    pub fn objects(&self) -> &Objects {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut Objects {
        &mut self.objects
    }

    /// Name of the enclosing `.xcodeproj` bundle without its extension.
    pub fn project_name(&self) -> Option<&str> {
        self.path
            .parent()
            .and_then(Utf8Path::file_name)
            .map(|name| name.strip_suffix(".xcodeproj").unwrap_or(name))
    }

    /// Directory the `.xcodeproj` bundle lives in; `SOURCE_ROOT` paths resolve here.
    pub fn source_root(&self) -> Option<&Utf8Path> {
        self.path.parent().and_then(Utf8Path::parent)
    }

    pub fn root_object_id(&self) -> Option<&str> {
        self.header.get("rootObject").and_then(Value::as_str)
    }

    pub fn root_object(&self) -> Option<&Object> {
        self.root_object_id().and_then(|id| self.objects.get(id))
    }

    pub fn main_group_id(&self) -> ModelResult<ObjectId> {
        self.root_object()
            .and_then(|root| root.get_str("mainGroup"))
            .map(ObjectId::from)
            .ok_or(ModelError::MissingMainGroup)
    }

    pub fn native_targets(&self) -> impl Iterator<Item = (&ObjectId, &Object)> {
        self.objects.of_isa(isa::NATIVE_TARGET)
    }

    /// File references whose display name (`name`, else `path`) equals `name`.
    pub fn files_by_name(&self, name: &str) -> Vec<ObjectId> {
        self.objects
            .of_isa(isa::FILE_REFERENCE)
            .filter(|(_, o)| o.display_name() == Some(name))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn to_pbxproj(&self) -> String {
        write_project(self)
    }

    pub fn save(&self) -> ModelResult<()> {
        self.save_to(&self.path)
    }

    pub fn save_to(&self, path: &Utf8Path) -> ModelResult<()> {
        fs::write(path, self.to_pbxproj()).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path, "saved project");
        Ok(())
    }

    /// Add a file reference (and optionally build entries) for `path`.
    ///
    /// Returns the new ids, file reference first. An empty vector means a
    /// reference with the same `path` already exists and nothing was changed.
    pub fn add_file(&mut self, path: &str, opts: &FileOptions) -> ModelResult<Vec<ObjectId>> {
        if self
            .objects
            .of_isa(isa::FILE_REFERENCE)
            .any(|(_, o)| o.get_str("path") == Some(path))
        {
            debug!(path, "file reference already present");
            return Ok(Vec::new());
        }

        let parent = match &opts.parent {
            Some(id) => id.clone(),
            None => self.main_group_id()?,
        };
        if !self.objects.get(parent.as_str()).is_some_and(Object::is_group) {
            return Err(ModelError::structure(format!("{parent} is not a group")));
        }

        let kind = classify(Utf8Path::new(path));
        let phase = kind.phase.filter(|_| opts.create_build_files);
        let targets = match phase {
            Some(_) => self.select_targets(opts.target_name.as_deref())?,
            None => Vec::new(),
        };

        let file_id = self.objects.generate_id();
        let mut file = Object::new(isa::FILE_REFERENCE)
            .with("lastKnownFileType", kind.file_type)
            .with("path", path)
            .with("sourceTree", opts.source_tree.as_str());
        if let Some(base) = Utf8Path::new(path).file_name()
            && base != path
        {
            file.set("name", base);
        }
        self.objects.insert(file_id.clone(), file);
        if let Some(group) = self.objects.get_mut(parent.as_str()) {
            group.push_to_array("children", &file_id);
        }

        let mut created = vec![file_id.clone()];
        if let Some(phase) = phase {
            for target in &targets {
                let phase_id = self.ensure_phase(target, phase)?;
                let build_id = self.objects.generate_id();
                self.objects.insert(
                    build_id.clone(),
                    Object::new(isa::BUILD_FILE).with("fileRef", &file_id),
                );
                if let Some(phase) = self.objects.get_mut(phase_id.as_str()) {
                    phase.push_to_array("files", &build_id);
                }
                created.push(build_id);
            }
        }

        info!(path, id = %file_id, build_files = created.len() - 1, "added file reference");
        Ok(created)
    }

    fn select_targets(&self, name: Option<&str>) -> ModelResult<Vec<ObjectId>> {
        match name {
            Some(name) => self
                .native_targets()
                .find(|(_, t)| t.get_str("name") == Some(name))
                .map(|(id, _)| vec![id.clone()])
                .ok_or_else(|| ModelError::TargetNotFound(name.to_string())),
            None => Ok(self.native_targets().map(|(id, _)| id.clone()).collect()),
        }
    }

    /// The target's build phase of `kind`, created and attached if missing.
    fn ensure_phase(&mut self, target: &ObjectId, kind: PhaseKind) -> ModelResult<ObjectId> {
        let target_obj = self
            .objects
            .get(target.as_str())
            .ok_or_else(|| ModelError::structure(format!("target {target} vanished")))?;
        let existing = target_obj
            .ids("buildPhases")
            .find(|id| self.objects.get(id).is_some_and(|p| p.isa() == kind.isa()))
            .map(ObjectId::from);
        if let Some(id) = existing {
            return Ok(id);
        }

        let id = self.objects.generate_id();
        self.objects.insert(
            id.clone(),
            Object::new(kind.isa())
                .with("buildActionMask", "2147483647")
                .with("files", Vec::<Value>::new())
                .with("runOnlyForDeploymentPostprocessing", "0"),
        );
        if let Some(target) = self.objects.get_mut(target.as_str()) {
            target.push_to_array("buildPhases", &id);
        }
        debug!(phase = kind.isa(), id = %id, "created build phase");
        Ok(id)
    }

    /// Remove a file reference, its build files, and all memberships of both.
    ///
    /// Returns `false` when `id` is not a file reference.
    pub fn remove_file_by_id(&mut self, id: &str) -> bool {
        if !self
            .objects
            .get(id)
            .is_some_and(|o| o.isa() == isa::FILE_REFERENCE)
        {
            return false;
        }

        let build_files: Vec<ObjectId> = self
            .objects
            .of_isa(isa::BUILD_FILE)
            .filter(|(_, o)| o.get_str("fileRef") == Some(id))
            .map(|(bid, _)| bid.clone())
            .collect();
        for build_file in &build_files {
            self.purge_object(build_file.as_str());
        }
        self.purge_object(id);
        info!(id, build_files = build_files.len(), "removed file reference");
        true
    }

    /// Delete one object and strip its id from every array in the table.
    pub fn purge_object(&mut self, id: &str) -> bool {
        let existed = self.objects.remove(id).is_some();
        let stripped = self.objects.strip_references(id);
        debug!(id, existed, stripped, "purged object");
        existed
    }

    /// Resolve a `/`-separated group path below the main group, creating
    /// missing groups along the way. An empty path is the main group.
    pub fn get_or_create_group(&mut self, path: &str) -> ModelResult<ObjectId> {
        let mut current = self.main_group_id()?;
        for component in path.split('/').filter(|c| !c.is_empty()) {
            let found = self.objects.get(current.as_str()).and_then(|group| {
                group
                    .ids("children")
                    .find(|child| {
                        self.objects.get(child).is_some_and(|c| {
                            c.is_group()
                                && (c.get_str("name") == Some(component)
                                    || c.get_str("path") == Some(component))
                        })
                    })
                    .map(ObjectId::from)
            });

            current = match found {
                Some(id) => id,
                None => {
                    let id = self.objects.generate_id();
                    self.objects.insert(
                        id.clone(),
                        Object::new(isa::GROUP)
                            .with("children", Vec::<Value>::new())
                            .with("path", component)
                            .with("sourceTree", "<group>"),
                    );
                    if let Some(parent) = self.objects.get_mut(current.as_str()) {
                        parent.push_to_array("children", &id);
                    }
                    debug!(component, id = %id, "created group");
                    id
                }
            };
        }
        Ok(current)
    }
}
