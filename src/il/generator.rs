use crate::{ast::*, prelude::*};

use super::{context::Context, sink::InstructionSink, tac::*};

/// Generate a three-address code listing for a program.
pub fn generate(program: &Program) -> TacListing {
    let mut listing = TacListing::new();
    generate_into(program, &mut listing);
    listing
}

/// Generate a program into an arbitrary sink, using a fresh [`Context`].
pub fn generate_into<S: InstructionSink + ?Sized>(program: &Program, sink: &mut S) {
    let mut ctx = Context::new();
    program.generate(sink, &mut ctx);
}

/// A node that can be lowered to three-address code.
///
/// Children are always lowered before their parent uses their results, left to right.
pub trait Generate {
    /// Where the node's result lives. Statements produce no result.
    type Output;

    fn generate<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context)
        -> Self::Output;
}

/// The outcome of evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluated {
    /// Where the expression's value lives.
    pub result: Name,
    /// The result of the binary operation evaluated last within the expression, if any.
    pub last_binary: Option<Name>,
}
impl Evaluated {
    fn plain(result: Name) -> Self {
        Self {
            result,
            last_binary: None,
        }
    }

    /// The name a loop should branch on. A binary operation nested anywhere in the condition
    /// takes precedence over the overall result.
    pub fn branch_operand(&self) -> &Name {
        self.last_binary.as_ref().unwrap_or(&self.result)
    }
}

impl Expr {
    /// Lower an expression, reporting both its result and the last binary operation it
    /// evaluated.
    pub fn evaluate<S: InstructionSink + ?Sized>(
        &self,
        sink: &mut S,
        ctx: &mut Context,
    ) -> Evaluated {
        match self {
            Expr::Constant(constant) => {
                let temp = ctx.next_temp();
                sink.emit(Instr::Assign(
                    temp.clone(),
                    Value::Const(constant.value.clone()),
                ));
                Evaluated::plain(temp)
            }
            Expr::Variable(var) => var.load(sink, ctx),
            Expr::Binary(bin) => {
                let lhs = bin.lhs.evaluate(sink, ctx);
                let rhs = bin.rhs.evaluate(sink, ctx);

                let temp = ctx.next_temp();
                sink.emit(Instr::Bin(temp.clone(), bin.op, lhs.result, rhs.result));
                Evaluated {
                    result: temp.clone(),
                    last_binary: Some(temp),
                }
            }
            Expr::Unary(un) => {
                let operand = un.operand.evaluate(sink, ctx);

                let temp = ctx.next_temp();
                sink.emit(Instr::Unary(temp.clone(), un.op, operand.result));
                Evaluated {
                    result: temp,
                    last_binary: operand.last_binary,
                }
            }
            Expr::Assign(assign) => assign.store(sink, ctx),
            Expr::Call(call) => call.invoke(sink, ctx),
        }
    }
}
impl Generate for Expr {
    type Output = Name;

    fn generate<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) -> Name {
        self.evaluate(sink, ctx).result
    }
}

impl Variable {
    /// Read the variable. Scalar reads reuse an earlier load until the variable is reassigned;
    /// element reads always load.
    fn load<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) -> Evaluated {
        let storage = ctx.storage(&self.name);

        if self.is_indexed() {
            let (index, last_binary) = self.subscript(sink, ctx);
            let temp = ctx.next_temp();
            sink.emit(Instr::IndexLoad(temp.clone(), storage, index));
            return Evaluated {
                result: temp,
                last_binary,
            };
        }

        if let Some(cached) = ctx.cached_load(&self.name) {
            trace!("reusing {} for {}", cached, self.name);
            return Evaluated::plain(cached.clone());
        }

        if storage.looks_like_temp() {
            return Evaluated::plain(storage);
        }

        let temp = ctx.next_temp();
        sink.emit(Instr::Assign(temp.clone(), storage.into()));
        ctx.record_load(self.name.clone(), temp.clone());
        Evaluated::plain(temp)
    }

    /// Compute the subscript of an element access into a fresh temporary. Without an index
    /// expression the first element is addressed.
    fn subscript<S: InstructionSink + ?Sized>(
        &self,
        sink: &mut S,
        ctx: &mut Context,
    ) -> (Value, Option<Name>) {
        match &self.index {
            None => (Value::Const("0".to_string()), None),
            Some(index) => {
                let evaluated = index.evaluate(sink, ctx);
                let temp = ctx.next_temp();
                sink.emit(Instr::Assign(temp.clone(), evaluated.result.into()));
                (temp.into(), evaluated.last_binary)
            }
        }
    }
}

impl Assign {
    /// Lower an assignment. The assigned value is the assignment's result.
    fn store<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) -> Evaluated {
        let value = self.value.evaluate(sink, ctx);
        let target = &self.target;
        let storage = ctx.storage(&target.name);

        if target.is_indexed() {
            let (index, index_binary) = target.subscript(sink, ctx);
            sink.emit(Instr::IndexStore(storage, index, value.result.clone()));
            return Evaluated {
                result: value.result,
                last_binary: index_binary.or(value.last_binary),
            };
        }

        sink.emit(Instr::Assign(storage, value.result.clone().into()));
        ctx.record_assignment(&target.name, value.result.clone());
        value
    }
}

impl Call {
    /// Lower a function call. All arguments are evaluated before any is pushed.
    fn invoke<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) -> Evaluated {
        let mut last_binary = None;
        let mut args = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            let evaluated = arg.evaluate(sink, ctx);
            if evaluated.last_binary.is_some() {
                last_binary = evaluated.last_binary;
            }
            args.push(evaluated.result);
        }

        for arg in &args {
            sink.emit(Instr::Param(arg.clone()));
        }

        let temp = ctx.next_temp();
        sink.emit(Instr::Call(temp.clone(), self.name.clone(), args.len()));
        Evaluated {
            result: temp,
            last_binary,
        }
    }
}

impl Generate for Stmt {
    type Output = ();

    fn generate<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) {
        match self {
            Stmt::Expression(Some(expr)) => {
                expr.generate(sink, ctx);
            }
            Stmt::Expression(None) => (),
            Stmt::Block(block) => block.generate(sink, ctx),
            Stmt::If(if_stmt) => if_stmt.generate(sink, ctx),
            Stmt::While(while_stmt) => while_stmt.generate(sink, ctx),
            Stmt::For(for_stmt) => for_stmt.generate(sink, ctx),
            Stmt::Return(expr) => generate_return(expr.as_ref(), sink, ctx),
            Stmt::Declaration(decl) => decl.generate(sink, ctx),
        }
    }
}

impl Generate for Block {
    type Output = ();

    fn generate<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) {
        for stmt in &self.statements {
            stmt.generate(sink, ctx);
        }
    }
}

/// Lower a return statement. Returning a variable that was assigned earlier in the function
/// returns the assigned temporary without reloading the variable.
fn generate_return<S: InstructionSink + ?Sized>(
    expr: Option<&Expr>,
    sink: &mut S,
    ctx: &mut Context,
) {
    let Some(expr) = expr else {
        sink.emit(Instr::Return(None));
        return;
    };

    if let Some(var) = expr.as_scalar_var() {
        if let Some(assigned) = ctx.last_assigned(&var.name) {
            sink.emit(Instr::Return(Some(assigned.clone())));
            return;
        }
    }

    let result = expr.generate(sink, ctx);
    sink.emit(Instr::Return(Some(result)));
}

impl Generate for Declaration {
    type Output = ();

    fn generate<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) {
        for declarator in &self.declarators {
            // Declared variables live in their own slot.
            ctx.storage(&declarator.name);
            sink.emit(Instr::Declare(
                self.type_spec,
                declarator.name.clone(),
                declarator.length,
            ));
        }
    }
}

impl Generate for Function {
    type Output = ();

    /// Lower a function. Each parameter is copied into a temporary up front, and reads of the
    /// parameter use that temporary.
    fn generate<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) {
        trace!("generating function {}", self.name);
        ctx.enter_function();

        sink.emit(Instr::Function(
            self.return_type,
            self.name.clone(),
            self.params.clone(),
        ));

        for param in &self.params {
            let temp = ctx.next_temp();
            ctx.bind(param.name.clone(), temp.clone());
            sink.emit(Instr::Assign(temp, Name::Var(param.name.clone()).into()));
        }

        self.body.generate(sink, ctx);

        sink.emit(Instr::Separator);
    }
}

impl Generate for Program {
    type Output = ();

    fn generate<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) {
        for unit in &self.units {
            match unit {
                Unit::Function(function) => function.generate(sink, ctx),
                Unit::Declaration(decl) => decl.generate(sink, ctx),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::il::test_support::*;

    #[test]
    fn repeated_reads_share_one_load() {
        assert_generates!(
            func("f").body(vec![set("x", int("1")), set("y", add(var("x"), var("x")))]),
            [
                "// Function: void f()",
                "t0 = 1",
                "x = t0",
                "t1 = x",
                "t2 = t1 + t1",
                "y = t2",
                "",
            ]
        )
    }

    #[test]
    fn reassignment_forces_a_fresh_load() {
        assert_generates!(
            func("f").body(vec![
                set("x", int("1")),
                set("a", var("x")),
                set("x", int("2")),
                set("b", var("x")),
            ]),
            [
                "// Function: void f()",
                "t0 = 1",
                "x = t0",
                "t1 = x",
                "a = t1",
                "t2 = 2",
                "x = t2",
                "t3 = x",
                "b = t3",
                "",
            ]
        )
    }

    #[test]
    fn returning_assigned_variable_skips_reload() {
        assert_generates!(
            Function::new(TypeSpec::Int, "five")
                .body(vec![set("x", int("5")), Stmt::ret(Some(var("x")))]),
            [
                "// Function: int five()",
                "t0 = 5",
                "x = t0",
                "return t0",
                "",
            ]
        )
    }

    #[test]
    fn returning_unassigned_variable_loads_it() {
        assert_generates!(
            Function::new(TypeSpec::Int, "get").body(vec![Stmt::ret(Some(var("g")))]),
            ["// Function: int get()", "t0 = g", "return t0", ""]
        )
    }

    #[test]
    fn bare_return_has_no_operand() {
        assert_generates!(
            func("f").body(vec![Stmt::ret(None)]),
            ["// Function: void f()", "return", ""]
        )
    }

    #[test]
    fn parameters_are_read_from_their_temporaries() {
        assert_generates!(
            Function::new(TypeSpec::Int, "add")
                .param(TypeSpec::Int, "a")
                .param(TypeSpec::Int, "b")
                .body(vec![Stmt::ret(Some(add(var("a"), var("b"))))]),
            [
                "// Function: int add(int a, int b)",
                "t0 = a",
                "t1 = b",
                "t2 = t0 + t1",
                "return t2",
                "",
            ]
        )
    }

    #[test]
    fn assigning_a_parameter_writes_its_temporary() {
        assert_generates!(
            Function::new(TypeSpec::Int, "inc")
                .param(TypeSpec::Int, "n")
                .body(vec![
                    set("n", add(var("n"), int("1"))),
                    Stmt::ret(Some(var("n"))),
                ]),
            [
                "// Function: int inc(int n)",
                "t0 = n",
                "t1 = 1",
                "t2 = t0 + t1",
                "t0 = t2",
                "return t2",
                "",
            ]
        )
    }

    #[test]
    fn identifier_spelled_like_a_temporary_is_not_loaded() {
        assert_generates!(
            func("f").body(vec![set("y", var("t9"))]),
            ["// Function: void f()", "y = t9", ""]
        )
    }

    #[test]
    fn unary_operation_applies_operator_to_operand() {
        assert_generates!(
            func("f").body(vec![set(
                "y",
                Expr::unary(UnOp::Neg, var("x"), TypeSpec::Int)
            )]),
            ["// Function: void f()", "t0 = x", "t1 = -t0", "y = t1", ""]
        )
    }

    #[test]
    fn call_evaluates_all_arguments_before_pushing() {
        assert_generates!(
            func("f").body(vec![set(
                "r",
                Expr::call("g", vec![var("x"), add(int("1"), int("2"))], TypeSpec::Int)
            )]),
            [
                "// Function: void f()",
                "t0 = x",
                "t1 = 1",
                "t2 = 2",
                "t3 = t1 + t2",
                "param t0",
                "param t3",
                "t4 = call g, 2",
                "r = t4",
                "",
            ]
        )
    }

    #[test]
    fn call_without_arguments_pushes_nothing() {
        assert_generates!(
            func("f").body(vec![Stmt::expr(Expr::call("tick", vec![], TypeSpec::Void))]),
            ["// Function: void f()", "t0 = call tick, 0", ""]
        )
    }

    #[test]
    fn nested_assignment_yields_assigned_value() {
        assert_generates!(
            func("f").body(vec![set(
                "a",
                Expr::assign(Variable::scalar("b", TypeSpec::Int), int("3"))
            )]),
            ["// Function: void f()", "t0 = 3", "b = t0", "a = t0", ""]
        )
    }

    #[test]
    fn array_elements_are_always_loaded_and_stored() {
        assert_generates!(
            func("f").body(vec![
                Declaration::new(TypeSpec::Int).array("a", 10).into(),
                set_elem("a", int("2"), int("5")),
                set("y", elem("a", int("2"))),
                set("z", elem("a", int("2"))),
            ]),
            [
                "// Function: void f()",
                "// Declaration: int a[10]",
                "t0 = 5",
                "t1 = 2",
                "t2 = t1",
                "a[t2] = t0",
                "t3 = 2",
                "t4 = t3",
                "t5 = a[t4]",
                "y = t5",
                "t6 = 2",
                "t7 = t6",
                "t8 = a[t7]",
                "z = t8",
                "",
            ]
        )
    }

    #[test]
    fn array_access_bypasses_variable_caches() {
        let mut ctx = Context::new();
        let mut listing = TacListing::new();

        set_elem("a", int("0"), var("x")).generate(&mut listing, &mut ctx);
        set("y", elem("a", var("i"))).generate(&mut listing, &mut ctx);

        assert_eq!(None, ctx.cached_load("a"));
        assert_eq!(None, ctx.last_assigned("a"));
        assert!(ctx.cached_load("x").is_some());
        assert!(ctx.cached_load("i").is_some());
    }

    #[test]
    fn missing_subscript_addresses_first_element() {
        let mut ctx = Context::new();
        let mut listing = TacListing::new();

        let (index, last_binary) =
            Variable::scalar("a", TypeSpec::Int).subscript(&mut listing, &mut ctx);

        assert_eq!(Value::Const("0".to_string()), index);
        assert_eq!(None, last_binary);
        assert!(listing.is_empty());
    }

    #[test]
    fn declarations_bind_names_to_themselves() {
        let mut ctx = Context::new();
        let mut listing = TacListing::new();

        Declaration::new(TypeSpec::Char)
            .scalar("c")
            .array("buf", 4)
            .generate(&mut listing, &mut ctx);

        assert!(ctx.is_bound("c"));
        assert!(ctx.is_bound("buf"));
        assert_eq!(
            vec!["// Declaration: char c", "// Declaration: char buf[4]"],
            listing.to_lines()
        );
    }

    #[test]
    fn evaluation_reports_last_binary_operation() {
        let mut ctx = Context::new();
        let mut listing = TacListing::new();

        let negated = Expr::unary(UnOp::Not, lt(var("i"), var("n")), TypeSpec::Int)
            .evaluate(&mut listing, &mut ctx);

        assert_eq!(Name::Temp(3), negated.result);
        assert_eq!(Some(Name::Temp(2)), negated.last_binary);
        assert_eq!(&Name::Temp(2), negated.branch_operand());

        let plain = int("1").evaluate(&mut listing, &mut ctx);
        assert_eq!(&plain.result, plain.branch_operand());
    }

    #[test]
    fn each_function_starts_with_empty_caches() {
        let program: Program = [
            Unit::from(func("f").body(vec![set("y", var("x"))])),
            Unit::from(func("g").body(vec![set("z", var("x"))])),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            vec![
                "// Function: void f()",
                "t0 = x",
                "y = t0",
                "",
                "// Function: void g()",
                "t1 = x",
                "z = t1",
                "",
            ],
            generate(&program).to_lines()
        );
    }

    #[test]
    fn file_scope_declarations_precede_functions() {
        let mut program = Program::new();
        program.add_unit(Declaration::new(TypeSpec::Int).scalar("counter"));
        program.add_unit(func("f").body(vec![set("counter", int("0"))]));

        assert_eq!(
            vec![
                "// Declaration: int counter",
                "// Function: void f()",
                "t0 = 0",
                "counter = t0",
                "",
            ],
            generate(&program).to_lines()
        );
    }

    #[test]
    fn fresh_temporaries_are_never_reused() {
        let program: Program = [Unit::from(
            Function::new(TypeSpec::Int, "f")
                .param(TypeSpec::Int, "p")
                .body(vec![
                    set("x", add(var("p"), int("1"))),
                    set("y", Expr::call("g", vec![var("x"), var("x")], TypeSpec::Int)),
                    set_elem("a", var("y"), mul(var("y"), var("x"))),
                    Stmt::ret(Some(elem("a", int("0")))),
                ]),
        )]
        .into_iter()
        .collect();

        let listing = generate(&program);
        let mut seen = HashSet::new();
        for instr in listing.iter_instructions() {
            let temp = instr.write().filter(|name| matches!(name, Name::Temp(_)));
            if let Some(target) = temp {
                assert!(seen.insert(target.clone()), "{} written twice", target);
            }
        }
        assert!(!seen.is_empty());
    }
}
