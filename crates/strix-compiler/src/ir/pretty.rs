//! Pretty-printing for IR
//!
//! Provides human-readable output for debugging IR structures.

use super::block::BasicBlock;
use super::function::IrFunction;
use super::instr::IrInstr;
use super::module::IrModule;
use super::value::IrValue;
use std::fmt::Write;

/// Trait for pretty-printing IR constructs
pub trait PrettyPrint {
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for IrModule {
    fn pretty_print(&self) -> String {
        let mut output = String::new();
        writeln!(output, "; module {}", self.name).unwrap();
        writeln!(output).unwrap();

        // Binding storage
        if !self.variables.is_empty() {
            for (i, var) in self.variables.iter().enumerate() {
                writeln!(output, "; var v{} {} (in fn{})", i, var.name, var.owner.as_u32()).unwrap();
            }
            writeln!(output).unwrap();
        }

        for (i, func) in self.functions.iter().enumerate() {
            writeln!(output, "; fn{}", i).unwrap();
            output.push_str(&func.pretty_print());
            writeln!(output).unwrap();
        }

        output
    }
}

impl PrettyPrint for IrFunction {
    fn pretty_print(&self) -> String {
        let mut output = String::new();

        let params: Vec<String> = self.params.iter().map(|p| format!("{}", p)).collect();
        writeln!(
            output,
            "fn {}({}) -> {} {{",
            self.display_name(),
            params.join(", "),
            self.return_ty
        )
        .unwrap();

        for block in &self.blocks {
            output.push_str(&block.pretty_print_indented(2));
        }

        writeln!(output, "}}").unwrap();
        output
    }
}

impl BasicBlock {
    fn pretty_print_indented(&self, indent: usize) -> String {
        let mut output = String::new();
        let prefix = " ".repeat(indent);

        if let Some(label) = &self.label {
            writeln!(output, "{}{}: ; {}", prefix, self.id, label).unwrap();
        } else {
            writeln!(output, "{}{}:", prefix, self.id).unwrap();
        }

        for instr in &self.instructions {
            writeln!(output, "{}  {}", prefix, format_instr(instr)).unwrap();
        }

        writeln!(output, "{}  {}", prefix, self.terminator).unwrap();

        output
    }
}

fn format_instr(instr: &IrInstr) -> String {
    match instr {
        IrInstr::AllocObject {
            dest,
            size_hint,
            parent,
        } => match parent {
            Some(parent) => format!(
                "{} = alloc_object {}, parent {}",
                dest,
                size_hint,
                format_value(parent)
            ),
            None => format!("{} = alloc_object {}", dest, size_hint),
        },
        IrInstr::AllocObjectLiteral { dest, properties } => {
            let props: Vec<String> = properties
                .iter()
                .map(|(key, value)| format!("{:?}: {}", key, format_value(value)))
                .collect();
            if props.is_empty() {
                format!("{} = alloc_object_literal {{}}", dest)
            } else {
                format!("{} = alloc_object_literal {{ {} }}", dest, props.join(", "))
            }
        }
        IrInstr::CreateFunction { dest, func } => {
            format!("{} = create_function {}", dest, func)
        }
        IrInstr::StorePropertyStrict {
            object,
            property,
            value,
        } => {
            format!(
                "store_property_strict {} -> {}[{:?}]",
                format_value(value),
                format_value(object),
                property
            )
        }
        IrInstr::StoreNewOwnProperty {
            object,
            property,
            value,
        } => {
            format!(
                "store_new_own_property {} -> {}[{:?}]",
                format_value(value),
                format_value(object),
                property
            )
        }
        IrInstr::StoreVariable {
            variable,
            value,
            declaring,
        } => {
            if *declaring {
                format!("declare_var {} = {}", variable, format_value(value))
            } else {
                format!("store_var {} = {}", variable, format_value(value))
            }
        }
        IrInstr::CallBuiltin {
            dest,
            builtin,
            args,
        } => {
            let args_str: Vec<String> = args.iter().map(format_value).collect();
            if let Some(d) = dest {
                format!("{} = call_builtin {}({})", d, builtin, args_str.join(", "))
            } else {
                format!("call_builtin {}({})", builtin, args_str.join(", "))
            }
        }
    }
}

fn format_value(value: &IrValue) -> String {
    match value {
        IrValue::Register(reg) => format!("{}", reg),
        IrValue::Constant(c) => format!("{}", c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::block::Terminator;
    use crate::ir::instr::{BuiltinMethod, FunctionId, VariableId};
    use crate::ir::types::RuntimeType;
    use crate::ir::value::{IrConstant, Register, RegisterId};

    fn make_reg(id: u32, ty: RuntimeType) -> Register {
        Register::new(RegisterId::new(id), ty)
    }

    #[test]
    fn test_pretty_print_alloc_object() {
        let instr = IrInstr::AllocObject {
            dest: make_reg(1, RuntimeType::OBJECT),
            size_hint: 0,
            parent: Some(make_reg(0, RuntimeType::OBJECT).into()),
        };
        assert_eq!(
            format_instr(&instr),
            "r1:object = alloc_object 0, parent r0:object"
        );
    }

    #[test]
    fn test_pretty_print_object_literal() {
        let instr = IrInstr::AllocObjectLiteral {
            dest: make_reg(2, RuntimeType::OBJECT),
            properties: vec![
                ("x".to_string(), IrConstant::Number(0.0).into()),
                ("greet".to_string(), make_reg(1, RuntimeType::CLOSURE).into()),
            ],
        };
        assert_eq!(
            format_instr(&instr),
            "r2:object = alloc_object_literal { \"x\": 0, \"greet\": r1:closure }"
        );
    }

    #[test]
    fn test_pretty_print_stores() {
        let store = IrInstr::StorePropertyStrict {
            object: make_reg(0, RuntimeType::CLOSURE).into(),
            property: "prototype".to_string(),
            value: make_reg(1, RuntimeType::OBJECT).into(),
        };
        assert_eq!(
            format_instr(&store),
            "store_property_strict r1:object -> r0:closure[\"prototype\"]"
        );

        let declare = IrInstr::StoreVariable {
            variable: VariableId(0),
            value: make_reg(0, RuntimeType::CLOSURE).into(),
            declaring: true,
        };
        assert_eq!(format_instr(&declare), "declare_var v0 = r0:closure");
    }

    #[test]
    fn test_pretty_print_call_builtin() {
        let call = IrInstr::CallBuiltin {
            dest: None,
            builtin: BuiltinMethod::SilentSetPrototypeOf,
            args: vec![
                make_reg(2, RuntimeType::OBJECT).into(),
                make_reg(0, RuntimeType::OBJECT).into(),
            ],
        };
        assert_eq!(
            format_instr(&call),
            "call_builtin silentSetPrototypeOf(r2:object, r0:object)"
        );
    }

    #[test]
    fn test_pretty_print_function() {
        let mut func = IrFunction::new(Some("Point"), RuntimeType::UNDEFINED);
        let entry = func.create_block(Some("entry"));
        let block = func.get_block_mut(entry).unwrap();
        block.add_instr(IrInstr::CreateFunction {
            dest: make_reg(0, RuntimeType::CLOSURE),
            func: FunctionId(1),
        });
        block.set_terminator(Terminator::Return(IrConstant::Undefined.into()));

        let output = func.pretty_print();
        assert!(output.starts_with("fn Point() -> undefined {"));
        assert!(output.contains("bb0: ; entry"));
        assert!(output.contains("r0:closure = create_function fn1"));
        assert!(output.contains("return undefined"));
    }
}
