//! Prototype monomorphization.
//!
//! Generic (and non-generic) prototypes materialize concrete instances on
//! demand. Instances are cached per prototype under the canonical
//! type-argument key, so equal argument lists always yield the same
//! instance. The fresh instance's contextual type arguments are the
//! inherited bindings overwritten with the prototype's own
//! type-parameter-to-argument pairs.

use rustc_hash::FxHashMap;
use tracing::trace;
use tsw_ast::{Range, TypeNode};

use crate::elements::{
    ClassData, Element, ElementData, ElementId, ElementKind, LocalData, element_flags,
};
use crate::function::{FunctionData, Parameter};
use crate::program::Program;
use crate::types::{Type, types_to_string};

impl Program {
    /// Materialize (or fetch) the concrete function for a prototype and a
    /// resolved type-argument list. Parameters and the return type must be
    /// annotated; inference is not supported, so a missing annotation fails
    /// resolution. Setters always return `void`.
    pub fn resolve_function_prototype(
        &mut self,
        prototype: ElementId,
        type_arguments: &[Type],
        contextual_type_arguments: Option<&FxHashMap<String, Type>>,
    ) -> Option<ElementId> {
        let instance_key = types_to_string(type_arguments, "", "");
        let (declaration, prototype_internal, is_generic, is_setter) = {
            let element = &self.arena[prototype];
            let data = element
                .as_function_prototype()
                .expect("resolve target must be a function prototype");
            if let Some(&instance) = data.instances.get(&instance_key) {
                trace!(internal_name = %element.internal_name, key = %instance_key, "function instance cache hit");
                return Some(instance);
            }
            let declaration = data
                .declaration
                .clone()
                .expect("builtin prototypes are compiled intrinsically");
            (
                declaration,
                element.internal_name.clone(),
                element.has_flag(element_flags::GENERIC),
                element.has_flag(element_flags::SETTER),
            )
        };

        let mut contextual = contextual_type_arguments.cloned().unwrap_or_default();
        if is_generic {
            debug_assert_eq!(
                declaration.type_parameters.len(),
                type_arguments.len(),
                "type-argument arity must be validated by the caller"
            );
            for (parameter, argument) in declaration.type_parameters.iter().zip(type_arguments) {
                contextual.insert(parameter.name.text.clone(), argument.clone());
            }
        }

        let mut parameters = Vec::with_capacity(declaration.parameters.len());
        for parameter in &declaration.parameters {
            let type_node = parameter.type_node.as_ref()?;
            let ty = self.resolve_type(type_node, Some(&contextual), true)?;
            parameters.push(Parameter {
                name: parameter.name.text.clone(),
                ty,
                initializer: parameter.initializer.clone(),
            });
        }
        let return_type = if is_setter {
            Type::void()
        } else {
            let type_node = declaration.return_type.as_ref()?;
            self.resolve_type(type_node, Some(&contextual), true)?
        };

        let internal_name = format!(
            "{prototype_internal}{}",
            types_to_string(type_arguments, "<", ">")
        );
        let instance = self.create_function(
            prototype,
            internal_name,
            type_arguments.to_vec(),
            parameters,
            return_type,
            ElementId::NONE,
            Some(contextual),
        );
        self.arena[prototype]
            .as_function_prototype_mut()
            .expect("resolve target must be a function prototype")
            .instances
            .insert(instance_key, instance);
        // Generic instances get their own directory entries; a non-generic
        // instance shares its prototype's internal name, which stays mapped
        // to the prototype.
        let instance_internal = self.arena[instance].internal_name.clone();
        self.elements.entry(instance_internal).or_insert(instance);
        Some(instance)
    }

    /// Construct a resolved function element, registering parameter locals
    /// (and `this` at index 0 for instance methods).
    pub fn create_function(
        &mut self,
        prototype: ElementId,
        internal_name: String,
        type_arguments: Vec<Type>,
        parameters: Vec<Parameter>,
        return_type: Type,
        instance_method_of: ElementId,
        contextual_type_arguments: Option<FxHashMap<String, Type>>,
    ) -> ElementId {
        let mut locals: FxHashMap<String, ElementId> = FxHashMap::default();
        let mut index = 0u32;
        if !instance_method_of.is_none() {
            let class_type = self.arena[instance_method_of]
                .as_class()
                .expect("instance method owner must be a resolved class")
                .ty
                .clone();
            let this_local = self.arena.alloc(Element::new(
                ElementKind::Local,
                "this",
                "this",
                element_flags::NONE,
                ElementData::Local(LocalData {
                    index: 0,
                    ty: class_type,
                }),
            ));
            locals.insert("this".to_string(), this_local);
            index = 1;
        }
        for parameter in &parameters {
            let local = self.arena.alloc(Element::new(
                ElementKind::Local,
                parameter.name.clone(),
                parameter.name.clone(),
                element_flags::NONE,
                ElementData::Local(LocalData {
                    index,
                    ty: parameter.ty.clone(),
                }),
            ));
            locals.insert(parameter.name.clone(), local);
            index += 1;
        }

        let (name, flags, namespace) = {
            let element = &self.arena[prototype];
            (element.name.clone(), element.flags, element.namespace)
        };
        let mut data = FunctionData::new(
            prototype,
            type_arguments,
            parameters,
            return_type,
            instance_method_of,
            contextual_type_arguments,
        );
        data.locals = locals;
        let id = self.arena.alloc(Element::new(
            ElementKind::Function,
            name,
            internal_name,
            flags,
            ElementData::Function(data),
        ));
        self.arena[id].namespace = namespace;
        id
    }

    /// Materialize (or fetch) the concrete class or interface for a
    /// prototype and a resolved type-argument list. The instance carries the
    /// pointer-width class reference type and the contextual bindings its
    /// members will resolve against.
    pub fn resolve_class_prototype(
        &mut self,
        prototype: ElementId,
        type_arguments: &[Type],
        contextual_type_arguments: Option<&FxHashMap<String, Type>>,
    ) -> Option<ElementId> {
        let instance_key = types_to_string(type_arguments, "", "");
        let (declaration, prototype_internal, is_generic, is_interface, member_ids) = {
            let element = &self.arena[prototype];
            let data = element
                .as_class_prototype()
                .expect("resolve target must be a class prototype");
            if let Some(&instance) = data.instances.get(&instance_key) {
                trace!(internal_name = %element.internal_name, key = %instance_key, "class instance cache hit");
                return Some(instance);
            }
            let member_ids: Vec<ElementId> = data
                .instance_members
                .as_ref()
                .map(|members| members.values().copied().collect())
                .unwrap_or_default();
            (
                data.declaration
                    .clone()
                    .expect("builtin prototypes are compiled intrinsically"),
                element.internal_name.clone(),
                element.has_flag(element_flags::GENERIC),
                matches!(element.data, ElementData::InterfacePrototype(_)),
                member_ids,
            )
        };

        let mut contextual = contextual_type_arguments.cloned().unwrap_or_default();
        if is_generic {
            debug_assert_eq!(
                declaration.type_parameters.len(),
                type_arguments.len(),
                "type-argument arity must be validated by the caller"
            );
            for (parameter, argument) in declaration.type_parameters.iter().zip(type_arguments) {
                contextual.insert(parameter.name.text.clone(), argument.clone());
            }
        }

        let (name, flags, namespace) = {
            let element = &self.arena[prototype];
            (element.name.clone(), element.flags, element.namespace)
        };
        let internal_name = format!(
            "{prototype_internal}{}",
            types_to_string(type_arguments, "<", ">")
        );
        let data = ClassData {
            prototype,
            type_arguments: type_arguments.to_vec(),
            // Patched below once the instance id is known.
            ty: Type::void(),
            base: ElementId::NONE,
            contextual_type_arguments: Some(contextual),
        };
        let (kind, payload) = if is_interface {
            (ElementKind::Interface, ElementData::Interface(data))
        } else {
            (ElementKind::Class, ElementData::Class(data))
        };
        let instance = self
            .arena
            .alloc(Element::new(kind, name, internal_name.clone(), flags, payload));
        self.arena[instance].namespace = namespace;
        let ty = Type::class_type(self.target.pointer_size(), instance, internal_name.clone());
        self.arena[instance]
            .as_class_mut()
            .expect("freshly allocated class instance")
            .ty = ty;

        for member in member_ids {
            match self.arena[member].kind {
                ElementKind::FieldPrototype => {
                    // TODO: resolve the field's type against the instance's
                    // contextual type arguments and materialize a Field once
                    // memory layout assignment lands
                }
                ElementKind::FunctionPrototype => {
                    // TODO: materialize method instances against the
                    // contextual type arguments once call resolution needs
                    // them
                }
                ElementKind::Property => {}
                _ => unreachable!("unexpected instance member kind"),
            }
        }

        self.arena[prototype]
            .as_class_prototype_mut()
            .expect("resolve target must be a class prototype")
            .instances
            .insert(instance_key, instance);
        self.elements.entry(internal_name).or_insert(instance);
        Some(instance)
    }

    /// Resolve a function prototype from raw type-argument nodes, enforcing
    /// the generic/non-generic arity invariant.
    pub fn resolve_function_incl_type_arguments(
        &mut self,
        prototype: ElementId,
        type_argument_nodes: &[TypeNode],
        contextual_type_arguments: Option<&FxHashMap<String, Type>>,
        alternative_report_range: &Range,
    ) -> Option<ElementId> {
        let type_arguments = self.resolve_prototype_type_arguments(
            prototype,
            type_argument_nodes,
            contextual_type_arguments,
            alternative_report_range,
        )?;
        self.resolve_function_prototype(prototype, &type_arguments, contextual_type_arguments)
    }

    /// Resolve a class prototype from raw type-argument nodes, enforcing
    /// the generic/non-generic arity invariant.
    pub fn resolve_class_incl_type_arguments(
        &mut self,
        prototype: ElementId,
        type_argument_nodes: &[TypeNode],
        contextual_type_arguments: Option<&FxHashMap<String, Type>>,
        alternative_report_range: &Range,
    ) -> Option<ElementId> {
        let type_arguments = self.resolve_prototype_type_arguments(
            prototype,
            type_argument_nodes,
            contextual_type_arguments,
            alternative_report_range,
        )?;
        self.resolve_class_prototype(prototype, &type_arguments, contextual_type_arguments)
    }

    fn resolve_prototype_type_arguments(
        &mut self,
        prototype: ElementId,
        type_argument_nodes: &[TypeNode],
        contextual_type_arguments: Option<&FxHashMap<String, Type>>,
        alternative_report_range: &Range,
    ) -> Option<Vec<Type>> {
        let type_parameters = {
            let element = &self.arena[prototype];
            let declared = match &element.data {
                ElementData::FunctionPrototype(data) => data
                    .declaration
                    .as_ref()
                    .map(|declaration| declaration.type_parameters.clone()),
                ElementData::ClassPrototype(data) | ElementData::InterfacePrototype(data) => data
                    .declaration
                    .as_ref()
                    .map(|declaration| declaration.type_parameters.clone()),
                _ => unreachable!("type arguments apply to prototypes only"),
            };
            declared.expect("builtin prototypes are compiled intrinsically")
        };
        self.resolve_type_arguments(
            &type_parameters,
            type_argument_nodes,
            contextual_type_arguments,
            alternative_report_range,
        )
    }
}
