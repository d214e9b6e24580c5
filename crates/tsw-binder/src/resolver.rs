//! Type and expression resolution.
//!
//! Resolvers report failures as diagnostics and return `None`; callers
//! decide whether a missing name is fatal for their own operation. The
//! identifier lookup order is: function locals, then every enclosing
//! namespace of the contextual function's prototype, then the current file's
//! scope, then the global scope.

use rustc_hash::FxHashMap;
use tracing::trace;
use tsw_ast::{
    Expression, IdentifierExpression, PropertyAccessExpression, Range, TypeNode,
    TypeParameterNode,
};
use tsw_common::diagnostics::diagnostic_codes;
use tsw_common::naming::{mangle_path, mangle_static};

use crate::elements::ElementId;
use crate::program::Program;
use crate::types::{Type, types_to_string};

impl Program {
    /// Resolve a type annotation to a concrete type.
    ///
    /// Type arguments are resolved first and any failure propagates. A bare
    /// name that matches a contextual type-parameter placeholder resolves to
    /// its binding. Otherwise the lookup order is: the annotation's
    /// file-local qualified name, the program-global name, then a declared
    /// type alias (chased with no contextual arguments).
    pub fn resolve_type(
        &mut self,
        node: &TypeNode,
        contextual_type_arguments: Option<&FxHashMap<String, Type>>,
        report_not_found: bool,
    ) -> Option<Type> {
        let mut resolved_arguments = Vec::with_capacity(node.type_arguments.len());
        for argument in &node.type_arguments {
            resolved_arguments.push(self.resolve_type(
                argument,
                contextual_type_arguments,
                report_not_found,
            )?);
        }

        let simple_name = &node.name.text;
        let global_name = if resolved_arguments.is_empty() {
            if let Some(contextual) = contextual_type_arguments {
                if let Some(ty) = contextual.get(simple_name) {
                    return Some(ty.clone());
                }
            }
            simple_name.clone()
        } else {
            format!(
                "{simple_name}{}",
                types_to_string(&resolved_arguments, "<", ">")
            )
        };

        let local_name = mangle_path(&node.range.source, &global_name);
        if let Some(ty) = self.types.get(&local_name) {
            return Some(ty.clone());
        }
        if let Some(ty) = self.types.get(&global_name) {
            return Some(ty.clone());
        }
        if let Some(alias) = self.type_aliases.get(&global_name) {
            let alias = alias.clone();
            return self.resolve_type(&alias, None, report_not_found);
        }

        if report_not_found {
            self.error(
                diagnostic_codes::CANNOT_FIND_NAME,
                &node.name.range,
                &[simple_name],
            );
        }
        None
    }

    /// Resolve a supplied type-argument list against declared parameters.
    ///
    /// An arity mismatch is reported at the join of the first and last
    /// supplied argument ranges, or at the end of `alternative_report_range`
    /// when no arguments were supplied at all.
    pub fn resolve_type_arguments(
        &mut self,
        type_parameters: &[TypeParameterNode],
        type_argument_nodes: &[TypeNode],
        contextual_type_arguments: Option<&FxHashMap<String, Type>>,
        alternative_report_range: &Range,
    ) -> Option<Vec<Type>> {
        let expected = type_parameters.len();
        let actual = type_argument_nodes.len();
        if expected != actual {
            let range = if actual > 0 {
                type_argument_nodes[0]
                    .range
                    .merge(&type_argument_nodes[actual - 1].range)
            } else {
                alternative_report_range.at_end()
            };
            self.error(
                diagnostic_codes::EXPECTED_TYPE_ARGUMENTS,
                &range,
                &[&expected.to_string(), &actual.to_string()],
            );
            return None;
        }
        let mut resolved = Vec::with_capacity(actual);
        for node in type_argument_nodes {
            resolved.push(self.resolve_type(node, contextual_type_arguments, true)?);
        }
        Some(resolved)
    }

    /// Resolve an identifier within a calling function's scope chain.
    pub fn resolve_identifier(
        &mut self,
        identifier: &IdentifierExpression,
        contextual_function: ElementId,
    ) -> Option<ElementId> {
        let name = identifier.text.as_str();

        let prototype = {
            let function = self.arena[contextual_function]
                .as_function()
                .expect("contextual element must be a resolved function");
            if let Some(&local) = function.locals.get(name) {
                return Some(local);
            }
            function.prototype
        };

        let mut namespace = self.arena[prototype].namespace;
        while !namespace.is_none() {
            let probe = mangle_static(&self.arena[namespace].internal_name, name);
            if let Some(&element) = self.elements.get(&probe) {
                return Some(element);
            }
            namespace = self.arena[namespace].namespace;
        }

        let declaration = self.arena[prototype]
            .as_function_prototype()
            .expect("resolved function must link a function prototype")
            .declaration
            .clone();
        if let Some(declaration) = declaration {
            let file_scoped = mangle_path(&declaration.range.source, name);
            if let Some(&element) = self.elements.get(&file_scoped) {
                return Some(element);
            }
        }

        if let Some(&element) = self.elements.get(name) {
            return Some(element);
        }

        trace!(name = %name, "identifier not found in any scope");
        self.error(
            diagnostic_codes::CANNOT_FIND_NAME,
            &identifier.range,
            &[name],
        );
        None
    }

    /// Resolve a property access to a member of its receiver.
    pub fn resolve_property_access(
        &mut self,
        property_access: &PropertyAccessExpression,
        contextual_function: ElementId,
    ) -> Option<ElementId> {
        let target = match &property_access.expression {
            Expression::Identifier(identifier) => {
                self.resolve_identifier(identifier, contextual_function)?
            }
            Expression::PropertyAccess(inner) => {
                self.resolve_property_access(inner, contextual_function)?
            }
            _ => unreachable!("property access receiver must be an identifier or property access"),
        };
        let property_name = &property_access.property.text;
        if let Some(member) = self.arena[target].member(property_name) {
            return Some(member);
        }
        let target_name = self.arena[target].internal_name.clone();
        self.error(
            diagnostic_codes::PROPERTY_DOES_NOT_EXIST,
            &property_access.property.range,
            &[property_name, &target_name],
        );
        None
    }

    /// Resolve an expression to the program element it names.
    pub fn resolve_element(
        &mut self,
        expression: &Expression,
        contextual_function: ElementId,
    ) -> Option<ElementId> {
        match expression {
            Expression::This(this) => {
                let enclosing_class = self.arena[contextual_function]
                    .as_function()
                    .expect("contextual element must be a resolved function")
                    .instance_method_of;
                if enclosing_class.is_none() {
                    self.error(
                        diagnostic_codes::THIS_CANNOT_BE_REFERENCED,
                        &this.range,
                        &[],
                    );
                    return None;
                }
                Some(enclosing_class)
            }
            Expression::Identifier(identifier) => {
                self.resolve_identifier(identifier, contextual_function)
            }
            Expression::PropertyAccess(property_access) => {
                self.resolve_property_access(property_access, contextual_function)
            }
            Expression::New(new) => self.resolve_element(&new.expression, contextual_function),
            _ => unimplemented!("element resolution for this expression kind"),
        }
    }
}
