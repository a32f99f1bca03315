//! Linearization of conditionals and loops into labels and jumps.

use crate::{ast::*, prelude::*};

use super::{
    context::Context,
    generator::Generate,
    sink::InstructionSink,
    tac::Instr,
};

impl Generate for If {
    type Output = ();

    /// Lower an if-statement. The shape is the same with or without an else-branch; a missing
    /// else-branch leaves its label as an empty fall-through to the end label.
    fn generate<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) {
        let cond = self.condition.generate(sink, ctx);
        let then_lbl = ctx.next_label();
        let else_lbl = ctx.next_label();
        trace!("if: then {}, else {}", then_lbl, else_lbl);

        sink.emit(Instr::IfTrue(cond, then_lbl));
        sink.emit(Instr::Goto(else_lbl));
        sink.emit(Instr::Label(then_lbl));
        self.then_branch.generate(sink, ctx);

        // Allocated after the then-branch, so labels inside it are numbered first.
        let end_lbl = ctx.next_label();
        sink.emit(Instr::Goto(end_lbl));
        sink.emit(Instr::Label(else_lbl));
        if let Some(else_branch) = &self.else_branch {
            else_branch.generate(sink, ctx);
        }
        sink.emit(Instr::Label(end_lbl));
    }
}

impl Generate for While {
    type Output = ();

    /// Lower a while-loop. The condition is evaluated again on every iteration.
    fn generate<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) {
        let start_lbl = ctx.next_label();
        let body_lbl = ctx.next_label();
        let end_lbl = ctx.next_label();
        trace!("while: start {}, body {}, end {}", start_lbl, body_lbl, end_lbl);

        sink.emit(Instr::Label(start_lbl));
        let cond = self.condition.generate(sink, ctx);
        sink.emit(Instr::IfTrue(cond, body_lbl));
        sink.emit(Instr::Goto(end_lbl));

        sink.emit(Instr::Label(body_lbl));
        self.body.generate(sink, ctx);
        sink.emit(Instr::Goto(start_lbl));
        sink.emit(Instr::Label(end_lbl));
    }
}

impl Generate for For {
    type Output = ();

    /// Lower a for-loop. Any clause may be missing; without a condition the loop never exits
    /// through its end label.
    fn generate<S: InstructionSink + ?Sized>(&self, sink: &mut S, ctx: &mut Context) {
        if let Some(init) = &self.init {
            init.generate(sink, ctx);
        }

        let cond_lbl = ctx.next_label();
        let body_lbl = ctx.next_label();
        let end_lbl = ctx.next_label();
        trace!("for: cond {}, body {}, end {}", cond_lbl, body_lbl, end_lbl);

        sink.emit(Instr::Label(cond_lbl));
        if let Some(cond) = self.condition.as_ref().and_then(LoopCondition::expression) {
            let evaluated = cond.evaluate(sink, ctx);
            sink.emit(Instr::IfTrue(evaluated.branch_operand().clone(), body_lbl));
            sink.emit(Instr::Goto(end_lbl));
        }

        sink.emit(Instr::Label(body_lbl));
        self.body.generate(sink, ctx);
        if let Some(update) = &self.update {
            update.generate(sink, ctx);
        }
        sink.emit(Instr::Goto(cond_lbl));
        sink.emit(Instr::Label(end_lbl));
    }
}
