pub mod batch_assembler;
