pub mod a001_cliente;
pub mod a002_cheque;
pub mod a003_rubro;
pub mod a004_unidad;
pub mod a005_localidad;
pub mod a006_presupuesto;
pub mod a007_ejercicio;
pub mod a008_cuenta_contable;
