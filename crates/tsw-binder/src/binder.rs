//! The initialization pass.
//!
//! Walks every top-level statement of every source in order, materializes
//! the corresponding element, and places it into the program's element
//! directory, its enclosing namespace's member map, the bare-name alias
//! slot when `@global`-decorated, and the file-export directory when
//! exported. Cross-module references that cannot be bound yet are staged as
//! queued exports/imports and resolved in a post-pass once all files are
//! bound. Binding never aborts: duplicate and unresolved names are reported
//! and the pass continues with the remaining declarations.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};
use tsw_ast::{
    ClassDeclaration, ClassMember, EnumDeclaration, ExportMember, ExportStatement,
    FieldDeclaration, FunctionDeclaration, ImportDeclaration, ImportStatement, Modifier,
    ModifierKind, NamespaceDeclaration, Source, Statement, TypeDeclaration, VariableStatement,
    has_decorator, has_modifier,
};
use tsw_common::diagnostics::diagnostic_codes;
use tsw_common::naming::{getter_name, mangle_instance, mangle_path, mangle_static, setter_name};

use crate::elements::{
    ClassPrototypeData, Element, ElementData, ElementId, ElementKind, EnumData, EnumValueData,
    FieldPrototypeData, FunctionPrototypeData, GlobalData, GlobalDeclaration, NamespaceData,
    PropertyData, element_flags,
};
use crate::program::Program;

/// A deferred export binding: the referenced name was not bound when the
/// export statement was seen.
struct QueuedExport {
    is_re_export: bool,
    referenced_name: String,
    member: Arc<ExportMember>,
    /// Module path as written, for diagnostics.
    module_path: String,
}

/// A deferred import binding.
struct QueuedImport {
    internal_name: String,
    referenced_name: String,
    declaration: Arc<ImportDeclaration>,
    module_path: String,
}

/// Binder state for one initialization run over a program's sources.
pub struct Binder<'a> {
    program: &'a mut Program,
    queued_exports: FxHashMap<String, QueuedExport>,
    /// Enqueue order of `queued_exports`, so the post-pass is deterministic.
    queued_export_order: Vec<String>,
    queued_imports: Vec<QueuedImport>,
}

impl<'a> Binder<'a> {
    pub fn new(program: &'a mut Program) -> Self {
        Binder {
            program,
            queued_exports: FxHashMap::default(),
            queued_export_order: Vec::new(),
            queued_imports: Vec::new(),
        }
    }

    /// Bind every source, then resolve queued imports and queued exports.
    pub fn run(&mut self) {
        let sources: Vec<Arc<Source>> = self.program.sources.clone();
        for source in &sources {
            for statement in &source.statements {
                self.init_statement(statement, None, source);
            }
        }
        self.resolve_queued_imports();
        self.resolve_queued_exports();
    }

    fn init_statement(
        &mut self,
        statement: &Statement,
        namespace: Option<ElementId>,
        source: &Arc<Source>,
    ) {
        match statement {
            Statement::Class(declaration) => {
                self.init_class(declaration, namespace, false);
            }
            Statement::Interface(declaration) => {
                self.init_class(declaration, namespace, true);
            }
            Statement::Enum(declaration) => self.init_enum(declaration, namespace),
            Statement::Function(declaration) => {
                self.init_function(declaration, namespace);
            }
            Statement::Namespace(declaration) => self.init_namespace(declaration, namespace, source),
            Statement::TypeDeclaration(declaration) => self.init_type_declaration(declaration),
            Statement::Variable(statement) => self.init_variable(statement, namespace),
            // Imports and exports are file-scoped; the parser does not
            // produce them inside namespaces.
            Statement::Export(statement) => {
                if namespace.is_none() {
                    self.init_export(statement, source);
                }
            }
            Statement::Import(statement) => {
                if namespace.is_none() {
                    self.init_import(statement);
                }
            }
            Statement::Expression(_) => {}
        }
    }

    // =========================================================================
    // Registration protocol
    // =========================================================================

    /// Shared tail of every declaration handler: the element is already
    /// allocated and its internal name checked against `elements`. Inserts
    /// it there, registers the bare-name alias for `@global` declarations,
    /// and links it into its namespace's member map or, failing that, the
    /// export directory.
    fn register(
        &mut self,
        id: ElementId,
        namespace: Option<ElementId>,
        report_range: &tsw_ast::Range,
        has_global: bool,
    ) {
        let (name, internal_name, exported) = {
            let element = &self.program.arena[id];
            (
                element.name.clone(),
                element.internal_name.clone(),
                element.has_flag(element_flags::EXPORTED),
            )
        };
        self.program.elements.insert(internal_name.clone(), id);
        debug!(internal_name = %internal_name, "registered element");

        if has_global {
            // A bare-name collision is an error but does not invalidate the
            // qualified registration above.
            if self.program.elements.contains_key(&name) {
                self.program
                    .error(diagnostic_codes::DUPLICATE_IDENTIFIER, report_range, &[&name]);
            } else {
                self.program.elements.insert(name.clone(), id);
            }
        }

        if let Some(namespace) = namespace {
            self.program.arena[id].namespace = namespace;
            let duplicate = self.program.arena[namespace]
                .members
                .as_ref()
                .is_some_and(|members| members.contains_key(&name));
            if duplicate {
                self.program
                    .error(diagnostic_codes::DUPLICATE_IDENTIFIER, report_range, &[&name]);
            } else {
                self.program.arena[namespace].members_mut().insert(name, id);
            }
        } else if exported {
            if self.program.exports.contains_key(&internal_name) {
                self.program.error(
                    diagnostic_codes::EXPORT_DECLARATION_CONFLICTS,
                    report_range,
                    &[&name],
                );
            } else {
                self.program.exports.insert(internal_name, id);
            }
        }
    }

    /// Internal-name duplicate check shared by the handlers. Reports and
    /// returns `true` when the name is already taken.
    fn check_duplicate(&mut self, internal_name: &str, name: &tsw_ast::Identifier) -> bool {
        if self.program.elements.contains_key(internal_name) {
            self.program.error(
                diagnostic_codes::DUPLICATE_IDENTIFIER,
                &name.range,
                &[&name.text],
            );
            return true;
        }
        false
    }

    // =========================================================================
    // Declaration handlers
    // =========================================================================

    fn init_class(
        &mut self,
        declaration: &Arc<ClassDeclaration>,
        namespace: Option<ElementId>,
        is_interface: bool,
    ) -> Option<ElementId> {
        if self.check_duplicate(&declaration.internal_name, &declaration.name) {
            return None;
        }
        let mut flags = flags_from_modifiers(&declaration.modifiers);
        if !declaration.type_parameters.is_empty() {
            flags |= element_flags::GENERIC;
        }
        let has_global = has_decorator("global", &declaration.decorators);
        if has_global {
            flags |= element_flags::GLOBAL;
        }
        let data = ClassPrototypeData {
            declaration: Some(declaration.clone()),
            instances: FxHashMap::default(),
            instance_members: None,
        };
        let (kind, data) = if is_interface {
            (
                ElementKind::InterfacePrototype,
                ElementData::InterfacePrototype(data),
            )
        } else {
            (ElementKind::ClassPrototype, ElementData::ClassPrototype(data))
        };
        let id = self.program.arena.alloc(Element::new(
            kind,
            declaration.name.text.clone(),
            declaration.internal_name.clone(),
            flags,
            data,
        ));
        self.register(id, namespace, &declaration.name.range, has_global);

        for member in &declaration.members {
            match member {
                ClassMember::Field(field) => self.init_field(field, id, is_interface),
                ClassMember::Method(method) => self.init_method(method, id, is_interface),
            }
        }
        Some(id)
    }

    fn init_field(
        &mut self,
        declaration: &Arc<FieldDeclaration>,
        class_prototype: ElementId,
        is_interface: bool,
    ) {
        let name = declaration.name.text.clone();
        let flags = flags_from_modifiers(&declaration.modifiers);
        let is_static = !is_interface && has_modifier(ModifierKind::Static, &declaration.modifiers);

        if is_static {
            // Static fields are globals: program-level entries plus entries
            // in the class's static member map.
            if self.check_duplicate(&declaration.internal_name, &declaration.name) {
                return;
            }
            let member_taken = self.program.arena[class_prototype]
                .members
                .as_ref()
                .is_some_and(|members| members.contains_key(&name));
            if member_taken {
                self.program.error(
                    diagnostic_codes::DUPLICATE_IDENTIFIER,
                    &declaration.name.range,
                    &[&name],
                );
                return;
            }
            let id = self.program.arena.alloc(Element::new(
                ElementKind::Global,
                name.clone(),
                declaration.internal_name.clone(),
                flags,
                ElementData::Global(GlobalData {
                    declaration: Some(GlobalDeclaration::Field(declaration.clone())),
                    ty: None,
                    constant_value: None,
                }),
            ));
            self.program.arena[id].namespace = class_prototype;
            self.program
                .elements
                .insert(declaration.internal_name.clone(), id);
            self.program.arena[class_prototype]
                .members_mut()
                .insert(name, id);
        } else {
            let taken = self.program.arena[class_prototype]
                .as_class_prototype()
                .expect("field owner must be a class prototype")
                .instance_member(&name)
                .is_some();
            if taken {
                self.program.error(
                    diagnostic_codes::DUPLICATE_IDENTIFIER,
                    &declaration.name.range,
                    &[&name],
                );
                return;
            }
            let id = self.program.arena.alloc(Element::new(
                ElementKind::FieldPrototype,
                name.clone(),
                declaration.internal_name.clone(),
                flags | element_flags::INSTANCE,
                ElementData::FieldPrototype(FieldPrototypeData {
                    declaration: declaration.clone(),
                    class_prototype,
                }),
            ));
            self.program.arena[id].namespace = class_prototype;
            self.program.arena[class_prototype]
                .as_class_prototype_mut()
                .expect("field owner must be a class prototype")
                .instance_members_mut()
                .insert(name, id);
        }
    }

    fn init_method(
        &mut self,
        declaration: &Arc<FunctionDeclaration>,
        class_prototype: ElementId,
        is_interface: bool,
    ) {
        let is_getter = has_modifier(ModifierKind::Get, &declaration.modifiers);
        let is_setter = has_modifier(ModifierKind::Set, &declaration.modifiers);
        if is_getter || is_setter {
            self.init_accessor(declaration, class_prototype, is_getter, is_interface);
            return;
        }

        let name = declaration.name.text.clone();
        let mut flags = flags_from_modifiers(&declaration.modifiers);
        if !declaration.type_parameters.is_empty() {
            flags |= element_flags::GENERIC;
        }
        let is_static = !is_interface && has_modifier(ModifierKind::Static, &declaration.modifiers);

        if is_static {
            // Static methods are plain prototypes with no class link.
            if self.check_duplicate(&declaration.internal_name, &declaration.name) {
                return;
            }
            let member_taken = self.program.arena[class_prototype]
                .members
                .as_ref()
                .is_some_and(|members| members.contains_key(&name));
            if member_taken {
                self.program.error(
                    diagnostic_codes::DUPLICATE_IDENTIFIER,
                    &declaration.name.range,
                    &[&name],
                );
                return;
            }
            let id = self.program.arena.alloc(Element::new(
                ElementKind::FunctionPrototype,
                name.clone(),
                declaration.internal_name.clone(),
                flags,
                ElementData::FunctionPrototype(FunctionPrototypeData {
                    declaration: Some(declaration.clone()),
                    class_prototype: ElementId::NONE,
                    instances: FxHashMap::default(),
                }),
            ));
            self.program.arena[id].namespace = class_prototype;
            self.program
                .elements
                .insert(declaration.internal_name.clone(), id);
            self.program.arena[class_prototype]
                .members_mut()
                .insert(name, id);
        } else {
            let taken = self.program.arena[class_prototype]
                .as_class_prototype()
                .expect("method owner must be a class prototype")
                .instance_member(&name)
                .is_some();
            if taken {
                self.program.error(
                    diagnostic_codes::DUPLICATE_IDENTIFIER,
                    &declaration.name.range,
                    &[&name],
                );
                return;
            }
            let id = self.program.arena.alloc(Element::new(
                ElementKind::FunctionPrototype,
                name.clone(),
                declaration.internal_name.clone(),
                flags | element_flags::INSTANCE,
                ElementData::FunctionPrototype(FunctionPrototypeData {
                    declaration: Some(declaration.clone()),
                    class_prototype,
                    instances: FxHashMap::default(),
                }),
            ));
            self.program.arena[id].namespace = class_prototype;
            self.program.arena[class_prototype]
                .as_class_prototype_mut()
                .expect("method owner must be a class prototype")
                .instance_members_mut()
                .insert(name, id);
        }
    }

    /// Bind a getter or setter, merging both accessors of one property name
    /// into a shared `Property` element.
    fn init_accessor(
        &mut self,
        declaration: &Arc<FunctionDeclaration>,
        class_prototype: ElementId,
        is_getter: bool,
        is_interface: bool,
    ) {
        let is_static = !is_interface && has_modifier(ModifierKind::Static, &declaration.modifiers);
        let name = declaration.name.text.clone();
        let prefixed_name = if is_getter {
            getter_name(&name)
        } else {
            setter_name(&name)
        };
        let class_internal = self.program.arena[class_prototype].internal_name.clone();
        let prototype_internal = if is_static {
            mangle_static(&class_internal, &prefixed_name)
        } else {
            mangle_instance(&class_internal, &prefixed_name)
        };

        let existing = if is_static {
            self.program.arena[class_prototype].member(&name)
        } else {
            self.program.arena[class_prototype]
                .as_class_prototype()
                .expect("accessor owner must be a class prototype")
                .instance_member(&name)
        };
        let property = match existing {
            Some(existing) => match self.program.arena[existing].as_property() {
                Some(property) => {
                    let taken = if is_getter {
                        property.getter_prototype
                    } else {
                        property.setter_prototype
                    };
                    if !taken.is_none() {
                        self.program.error(
                            diagnostic_codes::DUPLICATE_IDENTIFIER,
                            &declaration.name.range,
                            &[&prefixed_name],
                        );
                        return;
                    }
                    existing
                }
                None => {
                    // The property name collides with a non-accessor member.
                    self.program.error(
                        diagnostic_codes::DUPLICATE_IDENTIFIER,
                        &declaration.name.range,
                        &[&name],
                    );
                    return;
                }
            },
            None => {
                let property_internal = if is_static {
                    mangle_static(&class_internal, &name)
                } else {
                    mangle_instance(&class_internal, &name)
                };
                let mut property_flags = element_flags::NONE;
                if !is_static {
                    property_flags |= element_flags::INSTANCE;
                }
                let property = self.program.arena.alloc(Element::new(
                    ElementKind::Property,
                    name.clone(),
                    property_internal.clone(),
                    property_flags,
                    ElementData::Property(PropertyData {
                        class_prototype,
                        getter_prototype: ElementId::NONE,
                        setter_prototype: ElementId::NONE,
                    }),
                ));
                self.program.arena[property].namespace = class_prototype;
                if is_static {
                    self.program.arena[class_prototype]
                        .members_mut()
                        .insert(name.clone(), property);
                    if self.program.elements.contains_key(&property_internal) {
                        self.program.error(
                            diagnostic_codes::DUPLICATE_IDENTIFIER,
                            &declaration.name.range,
                            &[&name],
                        );
                    } else {
                        self.program.elements.insert(property_internal, property);
                    }
                } else {
                    self.program.arena[class_prototype]
                        .as_class_prototype_mut()
                        .expect("accessor owner must be a class prototype")
                        .instance_members_mut()
                        .insert(name.clone(), property);
                }
                property
            }
        };

        let mut flags = flags_from_modifiers(&declaration.modifiers);
        if !is_static {
            flags |= element_flags::INSTANCE;
        }
        let accessor = self.program.arena.alloc(Element::new(
            ElementKind::FunctionPrototype,
            prefixed_name,
            prototype_internal,
            flags,
            ElementData::FunctionPrototype(FunctionPrototypeData {
                declaration: Some(declaration.clone()),
                class_prototype: if is_static {
                    ElementId::NONE
                } else {
                    class_prototype
                },
                instances: FxHashMap::default(),
            }),
        ));
        self.program.arena[accessor].namespace = class_prototype;
        let data = self.program.arena[property]
            .as_property_mut()
            .expect("accessor target must be a property");
        if is_getter {
            data.getter_prototype = accessor;
        } else {
            data.setter_prototype = accessor;
        }
    }

    fn init_enum(&mut self, declaration: &Arc<EnumDeclaration>, namespace: Option<ElementId>) {
        if self.check_duplicate(&declaration.internal_name, &declaration.name) {
            return;
        }
        let mut flags = flags_from_modifiers(&declaration.modifiers);
        let has_global = has_decorator("global", &declaration.decorators);
        if has_global {
            flags |= element_flags::GLOBAL;
        }
        let id = self.program.arena.alloc(Element::new(
            ElementKind::Enum,
            declaration.name.text.clone(),
            declaration.internal_name.clone(),
            flags,
            ElementData::Enum(EnumData {
                declaration: declaration.clone(),
            }),
        ));
        self.register(id, namespace, &declaration.name.range, has_global);

        for value in &declaration.values {
            let value_name = value.name.text.clone();
            let taken = self.program.arena[id]
                .members
                .as_ref()
                .is_some_and(|members| members.contains_key(&value_name));
            if taken {
                self.program.error(
                    diagnostic_codes::DUPLICATE_IDENTIFIER,
                    &value.name.range,
                    &[&value_name],
                );
                continue;
            }
            let value_id = self.program.arena.alloc(Element::new(
                ElementKind::EnumValue,
                value_name.clone(),
                value.internal_name.clone(),
                element_flags::NONE,
                ElementData::EnumValue(EnumValueData {
                    declaration: value.clone(),
                    parent_enum: id,
                    constant_value: 0,
                }),
            ));
            self.program.arena[value_id].namespace = id;
            self.program.arena[id].members_mut().insert(value_name, value_id);
        }
    }

    fn init_function(
        &mut self,
        declaration: &Arc<FunctionDeclaration>,
        namespace: Option<ElementId>,
    ) -> Option<ElementId> {
        if self.check_duplicate(&declaration.internal_name, &declaration.name) {
            return None;
        }
        let mut flags = flags_from_modifiers(&declaration.modifiers);
        if !declaration.type_parameters.is_empty() {
            flags |= element_flags::GENERIC;
        }
        let has_global = has_decorator("global", &declaration.decorators);
        if has_global {
            flags |= element_flags::GLOBAL;
        }
        let id = self.program.arena.alloc(Element::new(
            ElementKind::FunctionPrototype,
            declaration.name.text.clone(),
            declaration.internal_name.clone(),
            flags,
            ElementData::FunctionPrototype(FunctionPrototypeData {
                declaration: Some(declaration.clone()),
                class_prototype: ElementId::NONE,
                instances: FxHashMap::default(),
            }),
        ));
        self.register(id, namespace, &declaration.name.range, has_global);
        Some(id)
    }

    fn init_namespace(
        &mut self,
        declaration: &Arc<NamespaceDeclaration>,
        namespace: Option<ElementId>,
        source: &Arc<Source>,
    ) {
        if self.check_duplicate(&declaration.internal_name, &declaration.name) {
            return;
        }
        let mut flags = flags_from_modifiers(&declaration.modifiers);
        let has_global = has_decorator("global", &declaration.decorators);
        if has_global {
            flags |= element_flags::GLOBAL;
        }
        let id = self.program.arena.alloc(Element::new(
            ElementKind::Namespace,
            declaration.name.text.clone(),
            declaration.internal_name.clone(),
            flags,
            ElementData::Namespace(NamespaceData {
                declaration: declaration.clone(),
            }),
        ));
        self.register(id, namespace, &declaration.name.range, has_global);

        for member in &declaration.members {
            self.init_statement(member, Some(id), source);
        }
    }

    fn init_type_declaration(&mut self, declaration: &Arc<TypeDeclaration>) {
        let name = &declaration.name.text;
        if self.program.types.contains_key(name) || self.program.type_aliases.contains_key(name) {
            self.program.error(
                diagnostic_codes::DUPLICATE_IDENTIFIER,
                &declaration.name.range,
                &[name],
            );
            return;
        }
        self.program
            .type_aliases
            .insert(name.clone(), declaration.alias.clone());
    }

    fn init_variable(&mut self, statement: &Arc<VariableStatement>, namespace: Option<ElementId>) {
        let mut flags = flags_from_modifiers(&statement.modifiers);
        let has_global = has_decorator("global", &statement.decorators);
        if has_global {
            flags |= element_flags::GLOBAL;
        }
        for declaration in &statement.declarations {
            if self.check_duplicate(&declaration.internal_name, &declaration.name) {
                continue;
            }
            let id = self.program.arena.alloc(Element::new(
                ElementKind::Global,
                declaration.name.text.clone(),
                declaration.internal_name.clone(),
                flags,
                ElementData::Global(GlobalData {
                    declaration: Some(GlobalDeclaration::Variable(declaration.clone())),
                    ty: None,
                    constant_value: None,
                }),
            ));
            self.register(id, namespace, &declaration.name.range, has_global);
        }
    }

    // =========================================================================
    // Imports and exports
    // =========================================================================

    fn init_import(&mut self, statement: &Arc<ImportStatement>) {
        if let Some(declarations) = &statement.declarations {
            for declaration in declarations {
                self.init_import_declaration(declaration, statement);
            }
        } else if statement.namespace_name.is_some() {
            self.program.error(
                diagnostic_codes::OPERATION_NOT_SUPPORTED,
                &statement.range,
                &[],
            );
        }
    }

    fn init_import_declaration(
        &mut self,
        declaration: &Arc<ImportDeclaration>,
        statement: &Arc<ImportStatement>,
    ) {
        if self.check_duplicate(&declaration.internal_name, &declaration.name) {
            return;
        }
        let referenced_name =
            mangle_path(&statement.internal_path, &declaration.external_name.text);
        if let Some(element) = self.resolve_export_chain(&referenced_name) {
            self.program
                .elements
                .insert(declaration.internal_name.clone(), element);
            return;
        }
        trace!(referenced_name = %referenced_name, "queueing import");
        self.queued_imports.push(QueuedImport {
            internal_name: declaration.internal_name.clone(),
            referenced_name,
            declaration: declaration.clone(),
            module_path: statement.path.clone(),
        });
    }

    fn init_export(&mut self, statement: &Arc<ExportStatement>, source: &Arc<Source>) {
        for member in &statement.members {
            let external_name = mangle_path(&source.internal_path, &member.external_name.text);
            if self.program.exports.contains_key(&external_name)
                || self.queued_exports.contains_key(&external_name)
            {
                self.program.error(
                    diagnostic_codes::EXPORT_DECLARATION_CONFLICTS,
                    &member.external_name.range,
                    &[&member.external_name.text],
                );
                continue;
            }
            match &statement.internal_path {
                None => {
                    // Local export: refers to a declaration of this file.
                    let referenced_name = mangle_path(&source.internal_path, &member.name.text);
                    if let Some(&element) = self.program.elements.get(&referenced_name) {
                        self.program.exports.insert(external_name, element);
                    } else {
                        self.enqueue_export(
                            external_name,
                            QueuedExport {
                                is_re_export: false,
                                referenced_name,
                                member: member.clone(),
                                module_path: source.path.clone(),
                            },
                        );
                    }
                }
                Some(module_internal_path) => {
                    let referenced_name = mangle_path(module_internal_path, &member.name.text);
                    if let Some(element) = self.resolve_export_chain(&referenced_name) {
                        self.program.exports.insert(external_name, element);
                    } else {
                        self.enqueue_export(
                            external_name,
                            QueuedExport {
                                is_re_export: true,
                                referenced_name,
                                member: member.clone(),
                                module_path: statement.path.clone().unwrap_or_default(),
                            },
                        );
                    }
                }
            }
        }
    }

    fn enqueue_export(&mut self, external_name: String, queued: QueuedExport) {
        trace!(external_name = %external_name, "queueing export");
        self.queued_export_order.push(external_name.clone());
        self.queued_exports.insert(external_name, queued);
    }

    /// Follow exports and queued re-exports from `referenced_name` until an
    /// element is found or the chain runs dry. The lookup is performed
    /// against the current referenced name after every advance, and a
    /// visited set terminates cyclic chains.
    fn resolve_export_chain(&self, referenced_name: &str) -> Option<ElementId> {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut current = referenced_name.to_string();
        loop {
            if let Some(&element) = self.program.exports.get(&current) {
                return Some(element);
            }
            let queued = self.queued_exports.get(&current)?;
            if queued.is_re_export {
                if !seen.insert(current) {
                    return None; // cyclic re-export chain
                }
                current = queued.referenced_name.clone();
            } else {
                return self.program.elements.get(&queued.referenced_name).copied();
            }
        }
    }

    /// Post-pass over imports that could not be bound while their module was
    /// still unbound.
    fn resolve_queued_imports(&mut self) {
        let queued = std::mem::take(&mut self.queued_imports);
        for import in queued {
            match self.resolve_export_chain(&import.referenced_name) {
                Some(element) => {
                    debug!(internal_name = %import.internal_name, "resolved queued import");
                    self.program.elements.insert(import.internal_name, element);
                }
                None => {
                    self.program.error(
                        diagnostic_codes::MODULE_HAS_NO_EXPORTED_MEMBER,
                        &import.declaration.external_name.range,
                        &[&import.module_path, &import.declaration.external_name.text],
                    );
                }
            }
        }
    }

    /// Post-pass over exports, following re-export links forward. A
    /// terminal non-re-export whose element is missing is an unresolved
    /// name; an unsatisfiable or cyclic re-export is a missing exported
    /// member.
    fn resolve_queued_exports(&mut self) {
        let order = std::mem::take(&mut self.queued_export_order);
        let queued = std::mem::take(&mut self.queued_exports);
        for external_name in order {
            let Some(mut current) = queued.get(&external_name) else {
                continue;
            };
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            loop {
                if current.is_re_export {
                    if let Some(&element) = self.program.exports.get(&current.referenced_name) {
                        self.program.exports.insert(external_name.clone(), element);
                        break;
                    }
                    if !seen.insert(current.referenced_name.as_str()) {
                        self.program.error(
                            diagnostic_codes::MODULE_HAS_NO_EXPORTED_MEMBER,
                            &current.member.name.range,
                            &[&current.module_path, &current.member.name.text],
                        );
                        break;
                    }
                    match queued.get(&current.referenced_name) {
                        Some(next) => current = next,
                        None => {
                            self.program.error(
                                diagnostic_codes::MODULE_HAS_NO_EXPORTED_MEMBER,
                                &current.member.name.range,
                                &[&current.module_path, &current.member.name.text],
                            );
                            break;
                        }
                    }
                } else {
                    if let Some(&element) = self.program.elements.get(&current.referenced_name) {
                        self.program.exports.insert(external_name.clone(), element);
                    } else {
                        self.program.error(
                            diagnostic_codes::CANNOT_FIND_NAME,
                            &current.member.name.range,
                            &[&current.member.name.text],
                        );
                    }
                    break;
                }
            }
        }
    }
}

/// Map declaration modifiers to element flags.
fn flags_from_modifiers(modifiers: &[Modifier]) -> u32 {
    let mut flags = element_flags::NONE;
    for modifier in modifiers {
        flags |= match modifier.kind {
            ModifierKind::Import => element_flags::IMPORTED,
            ModifierKind::Export => element_flags::EXPORTED,
            ModifierKind::Declare => element_flags::DECLARED,
            ModifierKind::Const => element_flags::CONSTANT,
            ModifierKind::Readonly => element_flags::READONLY,
            ModifierKind::Get => element_flags::GETTER,
            ModifierKind::Set => element_flags::SETTER,
            ModifierKind::Public => element_flags::PUBLIC,
            ModifierKind::Protected => element_flags::PROTECTED,
            ModifierKind::Private => element_flags::PRIVATE,
            ModifierKind::Static | ModifierKind::Abstract => element_flags::NONE,
        };
    }
    flags
}
